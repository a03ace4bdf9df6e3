pub mod flow;
pub mod invoker;
pub mod session;
pub mod state;

pub use flow::{Captures, Flow, StepDescriptor};
pub use invoker::{Call, Invocation, Invoker};
pub use session::{Credentials, Session};
pub use state::{FlowReport, FlowSummary, StepOutcome, StepStatus};
