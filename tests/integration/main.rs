//! Workspace integration tests: provider, built-in plugins, query engine,
//! dictionary cache, and permissions working together.

mod helpers;

mod controller_test;
mod dict_test;
mod permission_test;
mod plugins_test;
mod query_test;
