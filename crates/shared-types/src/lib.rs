pub mod types;

pub use types::{
    Location, Mutation, ParseLabelError, Severity, Strategy, SurvivingMutation,
};
