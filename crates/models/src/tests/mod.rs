/// Database connection and schema tests
pub mod db_tests;

/// CRUD operations tests for both entities
pub mod crud_tests;
