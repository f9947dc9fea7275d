//! Tracing initialisation for the `spellc` binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=spell_compile=debug` or `RUST_LOG=spell_eval=trace`. With
/// `SPELLC_TRACE_TREE` also set, spans are printed as an indented tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let registry = tracing_subscriber::registry().with(filter);

        if std::env::var_os("SPELLC_TRACE_TREE").is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::default()
                        .with_indent_lines(true)
                        .with_indent_amount(2)
                        .with_bracketed_fields(true)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
