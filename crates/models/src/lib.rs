pub mod db;
pub mod json_fields;
pub mod product;

#[cfg(test)]
mod tests;
