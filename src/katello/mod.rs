//! Katello/Foreman domain: API models and the operations the workflow
//! composes per content view.

pub mod errata;
pub mod jobs;
pub mod models;
pub mod publish;
pub mod resolver;
