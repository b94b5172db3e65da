//! Marker traits separating writes from reads
//!
//! Handlers are plain async functions; the markers make the intent of a
//! request type visible in its signature and let generic helpers log writes
//! and reads differently.

/// A request that writes to the search store
pub trait Command {}

/// A request that only reads
pub trait Query {}

fn short_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Log a command before its handler runs
pub fn trace_command<C: Command>(_command: &C) {
    tracing::info!(kind = "command", request = short_name::<C>(), "Handling command");
}

/// Log a query before its handler runs
pub fn trace_query<Q: Query>(_query: &Q) {
    tracing::debug!(kind = "query", request = short_name::<Q>(), "Handling query");
}
