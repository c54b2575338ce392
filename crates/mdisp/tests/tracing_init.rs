//! `init_tracing` next to a subscriber the host already installed.
//!
//! Lives in its own test binary: it sets `RUST_LOG` and the global
//! subscriber.

use mdisp::base::{BaseBook, Value};
use tracing_subscriber::util::SubscriberInitExt;

#[test]
fn test_init_tracing_keeps_host_subscriber() {
    tracing_subscriber::registry().init();
    std::env::set_var("RUST_LOG", "mdisp=debug");

    mdisp::init_tracing();
    mdisp::init_tracing();

    assert!(tracing::dispatcher::has_been_set());
    let base = BaseBook::new().ok();
    assert_eq!(
        base.and_then(|base| base.add(Value::Int(2), Value::Int(3)).ok()),
        Some(Value::Int(5))
    );
}
