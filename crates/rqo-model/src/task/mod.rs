mod poll;
pub use poll::TaskPollState;
