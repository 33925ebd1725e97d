//! Waitlist form state, controller and rendering

mod controller;
pub mod messages;
mod render;
mod state;
mod view;

pub use controller::{
	ControllerOptions, EditRejected, SubmissionError, SubmitOutcome, WaitlistFormController,
};
pub use render::{html_escape, render_form};
pub use state::{Field, FormState, Phase};
pub use view::FormView;
