pub mod seating;
pub mod test_setup;
