#[cfg(test)]
mod tests {
    use crate::camera_pipeline::channel::{channel_spec, resolve_order, ChannelKind, CHANNEL_TABLE};
    use crate::camera_pipeline::common::error::CameraError;

    #[test]
    fn test_table_rows_match_variants() {
        for (index, spec) in CHANNEL_TABLE.iter().enumerate() {
            assert_eq!(spec.kind as usize, index);
            assert_eq!(channel_spec(spec.kind).kind, spec.kind);
        }
    }

    #[test]
    fn test_distance_resolves_after_its_dependencies() {
        let order = resolve_order(ChannelKind::Distance).unwrap();
        assert_eq!(
            order,
            vec![ChannelKind::RawDepth, ChannelKind::Point3DImage, ChannelKind::Distance]
        );
    }

    #[test]
    fn test_every_channel_resolves_without_cycle() {
        for kind in ChannelKind::ALL {
            let order = resolve_order(kind).unwrap();
            assert_eq!(order.last(), Some(&kind));
        }
    }

    #[test]
    fn test_names_round_trip() {
        for kind in ChannelKind::ALL {
            assert_eq!(kind.name().parse::<ChannelKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let result = "Thermal".parse::<ChannelKind>();
        assert!(matches!(
            result.unwrap_err(),
            CameraError::UnknownChannel(name) if name == "Thermal"
        ));
    }
}
