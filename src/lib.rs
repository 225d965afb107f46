pub mod answer_evaluator;
pub mod answer_options;
pub mod cli;
pub mod database;
pub mod database_factory;
pub mod error;
pub mod operations;
pub mod practice_session;
pub mod problem_generator;
pub mod settings_query_string;
pub mod terminal;
pub mod test_parameters;
