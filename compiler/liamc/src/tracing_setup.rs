use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Nothing is installed unless `RUST_LOG` is
/// set, e.g. `RUST_LOG=liam_types=debug` or `RUST_LOG=liam_bytecode=trace`.
/// Setting `LIAM_LOG_TREE` switches to an indented span tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }

        let filter = EnvFilter::from_default_env();
        let tree = std::env::var_os("LIAM_LOG_TREE")
            .is_some()
            .then(|| tracing_tree::HierarchicalLayer::new(2).with_targets(true));
        let flat = tree
            .is_none()
            .then(|| fmt::layer().with_target(true).with_level(true));

        tracing_subscriber::registry()
            .with(filter)
            .with(flat)
            .with(tree)
            .init();
    });
}
