//! Handle Cache Demo
//!
//! Drives an `ExpiringCache` from several threads against a simulated remote
//! handle service and logs what the cache did.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handle_cache::{CacheConfig, CastingLoader, ExpiringCache};

const WORKERS: usize = 4;
const REQUESTS_PER_WORKER: usize = 200;
const REMOTE_LATENCY: Duration = Duration::from_millis(2);

/// Untyped handle as returned by the remote lookup service.
type RawHandle = Arc<dyn Any + Send + Sync>;

/// Concrete handle type held in the cache.
#[derive(Debug)]
struct RemoteObject {
    name: String,
    endpoint: String,
}

/// Main entry point for the demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache over a simulated remote loader
/// 4. Run worker threads issuing lookups over a key space twice the capacity
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handle_cache=info,handle_cache_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: capacity={}, freshness_window={:?}",
        config.capacity, config.freshness_window
    );

    let remote_calls = AtomicUsize::new(0);
    let loader = CastingLoader::new(
        |name: &String| -> Result<RawHandle, String> {
            remote_calls.fetch_add(1, Ordering::Relaxed);
            thread::sleep(REMOTE_LATENCY);
            let object = RemoteObject {
                name: name.clone(),
                endpoint: format!("tcp://objects.local/{}", name),
            };
            let handle: RawHandle = Arc::new(object);
            Ok(handle)
        },
        |raw: RawHandle| {
            raw.downcast::<RemoteObject>()
                .map_err(|_| "remote returned an unexpected handle type".to_string())
        },
    );

    let cache = ExpiringCache::from_config(&config, loader).context("failed to build cache")?;
    let key_space = config.capacity.saturating_mul(2).max(1);

    thread::scope(|scope| {
        for worker in 0..WORKERS {
            let cache = &cache;
            scope.spawn(move || {
                for i in 0..REQUESTS_PER_WORKER {
                    // Skewed toward low keys so some stay hot
                    let key = format!("object-{}", (i * (worker + 1)) % key_space);
                    match cache.get(&key) {
                        Ok(object) => {
                            debug!(
                                worker,
                                name = %object.name,
                                endpoint = %object.endpoint,
                                "resolved"
                            );
                        }
                        Err(err) => debug!(worker, %err, "lookup failed"),
                    }
                }
            });
        }
    });

    let total = WORKERS * REQUESTS_PER_WORKER;
    let loads = remote_calls.load(Ordering::Relaxed);
    info!(
        "Demo complete: {} lookups, {} remote loads, {} served from cache, {} entries cached",
        total,
        loads,
        total.saturating_sub(loads),
        cache.size()
    );

    Ok(())
}
