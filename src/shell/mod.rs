mod dispatcher;
mod resolver;
mod session;

pub use dispatcher::{Command, Flow, Session};
pub use resolver::{Resolved, list, resolve_cd};
pub use session::{Repl, run_reader, run_script};
