// Analytics engine: pure calculators over a user's application and resume
// records, plus the service that fetches records and assembles the views.
// Calculators never touch the database; all I/O goes through `source`.

pub mod distribution;
pub mod filters;
pub mod funnel;
pub mod handlers;
pub mod math;
pub mod models;
pub mod periods;
pub mod pipeline;
pub mod resumes;
pub mod service;
pub mod source;
pub mod store;
pub mod trends;
pub mod velocity;

#[cfg(test)]
pub(crate) mod testing;
