pub mod errors;
pub mod db;
pub mod queue;
pub mod reservation;

#[cfg(test)]
mod tests;
