pub mod form_workflow;

pub use form_workflow::{
    FormWorkflow, Notice, NoticeLevel, RecordView, Rejection, SubmissionOutcome,
};
