//! nib virtual machine — steppable execution of compiled programs.
//!
//! The VM is a stack machine whose entire control state (operand
//! stack, call frames, instruction pointer) is explicit data, never
//! the Rust call stack. That is what makes externally-paced stepping
//! possible: the host calls [`Vm::step`] whenever it likes, and
//! between calls the machine is inert and fully inspectable.
//!
//! Side effects leave the VM only through the injected [`Host`].
//!
//! # Usage
//!
//! Run to completion:
//!
//! ```
//! let output = nib_vm::run("10 20 + puts").unwrap();
//! assert_eq!(output, "30\n");
//! ```
//!
//! Stepped execution with live introspection:
//!
//! ```
//! use nib_vm::{begin_stepping, BufferHost};
//!
//! let mut vm = begin_stepping("10 20 + puts").unwrap();
//! let mut host = BufferHost::new();
//!
//! vm.step(&mut host).unwrap();
//! assert_eq!(vm.stack().len(), 1);
//!
//! while !vm.finished() {
//!     vm.step(&mut host).unwrap();
//! }
//! assert_eq!(host.output(), "30\n");
//! ```

pub mod error;
pub mod frame;
pub mod host;
pub mod machine;

mod builtins;
mod execute;

pub use error::{Error, RuntimeError};
pub use frame::Frame;
pub use host::{BufferHost, Host, HostCall, RecordingHost};
pub use machine::{Status, Vm};

use nib_compiler::CompileError;

/// Compile and run to completion, returning the accumulated print
/// output. Drawing calls are discarded.
///
/// # Errors
///
/// [`Error::Compile`] if the source does not compile (nothing ran);
/// [`Error::Runtime`] if an instruction failed, carrying the output
/// produced before the failure.
pub fn run(source: &str) -> Result<String, Error> {
    let mut host = BufferHost::new();
    run_with_host(source, &mut host)
}

/// As [`run`], but print and drawing calls are also forwarded to the
/// given host.
pub fn run_with_host(source: &str, host: &mut dyn Host) -> Result<String, Error> {
    let program = nib_compiler::compile(source)?;
    let mut vm = Vm::new(program);
    let mut tee = TeeHost {
        inner: host,
        output: String::new(),
    };
    match vm.run(&mut tee) {
        Ok(()) => Ok(tee.output),
        Err(error) => Err(Error::Runtime {
            error,
            output: tee.output,
        }),
    }
}

/// Compile and hand back a VM positioned at the first instruction,
/// ready for stepped execution.
pub fn begin_stepping(source: &str) -> Result<Vm, CompileError> {
    let program = nib_compiler::compile(source)?;
    Ok(Vm::new(program))
}

/// Captures print output while forwarding every call to the wrapped
/// host.
struct TeeHost<'a> {
    inner: &'a mut dyn Host,
    output: String,
}

impl Host for TeeHost<'_> {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
        self.inner.print(text);
    }

    fn set_fill_style(&mut self, r: f64, g: f64, b: f64) {
        self.inner.set_fill_style(r, g, b);
    }

    fn set_stroke_style(&mut self, r: f64, g: f64, b: f64) {
        self.inner.set_stroke_style(r, g, b);
    }

    fn rectangle(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.inner.rectangle(x0, y0, x1, y1);
    }

    fn begin_path(&mut self) {
        self.inner.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.inner.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.inner.line_to(x, y);
    }

    fn stroke(&mut self) {
        self.inner.stroke();
    }

    fn rotate(&mut self, angle: f64) {
        self.inner.rotate(angle);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.inner.translate(x, y);
    }

    fn save(&mut self) {
        self.inner.save();
    }

    fn restore(&mut self) {
        self.inner.restore();
    }
}
