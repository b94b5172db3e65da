//! CQRS building blocks
//!
//! Commands change state (a search is recorded), queries only read it. Every
//! command and query struct implements `mediator::Request` with its handler's
//! result type and one of the marker traits in [`middleware`], and is handled
//! by a standalone `handle` function in its feature slice.

pub mod middleware;
