
/// Connection helper behaviour
pub mod db_tests;
