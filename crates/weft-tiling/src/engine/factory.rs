//! Builds engines from their configuration record.

use tracing::debug;
use weft_config::{EngineConfig, LayoutKind};

use super::{
    BTreeLayout, Capabilities, Engine, EngineLayout, HalfLayout, MonocleLayout, PassthroughLayout,
    ThreeColumnLayout,
};

/// Capabilities each layout kind declares.
pub fn capabilities(kind: LayoutKind) -> Capabilities {
    match kind {
        LayoutKind::BTree | LayoutKind::Half | LayoutKind::ThreeColumn => Capabilities {
            translate_rotation: true,
            ..Capabilities::default()
        },
        LayoutKind::Monocle => Capabilities::default(),
        LayoutKind::Passthrough => Capabilities {
            tiles_mutable: true,
            untiled_by_default: true,
            ..Capabilities::default()
        },
    }
}

/// A fresh engine with an empty model for `config`.
pub fn create_engine(config: EngineConfig) -> Engine {
    let layout = match config.layout_kind {
        LayoutKind::BTree => EngineLayout::BTree(BTreeLayout::new()),
        LayoutKind::Half => EngineLayout::Half(HalfLayout::new()),
        LayoutKind::ThreeColumn => EngineLayout::ThreeColumn(ThreeColumnLayout::new()),
        LayoutKind::Monocle => EngineLayout::Monocle(MonocleLayout::new()),
        LayoutKind::Passthrough => EngineLayout::Passthrough(PassthroughLayout),
    };
    debug!(kind = %config.layout_kind, insertion = %config.insertion_point, "creating engine");
    Engine::from_parts(config, capabilities(config.layout_kind), layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_config::InsertionPoint;

    #[test]
    fn engine_matches_requested_kind() {
        for kind in LayoutKind::ALL {
            let config = EngineConfig::new(kind).with_insertion_point(InsertionPoint::Right);
            let engine = create_engine(config);
            assert_eq!(engine.kind(), kind);
            assert_eq!(engine.config(), config);
            let matches = matches!(
                (kind, engine.layout()),
                (LayoutKind::BTree, EngineLayout::BTree(_))
                    | (LayoutKind::Half, EngineLayout::Half(_))
                    | (LayoutKind::ThreeColumn, EngineLayout::ThreeColumn(_))
                    | (LayoutKind::Monocle, EngineLayout::Monocle(_))
                    | (LayoutKind::Passthrough, EngineLayout::Passthrough(_))
            );
            assert!(matches, "{kind}");
        }
    }

    #[test]
    fn only_passthrough_is_host_owned() {
        for kind in LayoutKind::ALL {
            let caps = capabilities(kind);
            assert_eq!(caps.tiles_mutable, kind == LayoutKind::Passthrough);
            assert_eq!(caps.untiled_by_default, kind == LayoutKind::Passthrough);
        }
        assert!(!capabilities(LayoutKind::Monocle).translate_rotation);
        assert!(capabilities(LayoutKind::ThreeColumn).translate_rotation);
    }
}
