//! The capability surface through which side effects leave the VM.
//!
//! The interpreter never prints or draws on its own. Every `puts` and
//! every drawing word turns into exactly one call on the injected
//! [`Host`], in instruction-execution order, and the VM holds no other
//! handle to the outside world.

/// Print sink and drawing surface, implemented by the embedder.
pub trait Host {
    /// Receive one piece of print output, newline included.
    fn print(&mut self, text: &str);

    fn set_fill_style(&mut self, r: f64, g: f64, b: f64);
    fn set_stroke_style(&mut self, r: f64, g: f64, b: f64);
    fn rectangle(&mut self, x0: f64, y0: f64, x1: f64, y1: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
    fn rotate(&mut self, angle: f64);
    fn translate(&mut self, x: f64, y: f64);
    fn save(&mut self);
    fn restore(&mut self);
}

/// Collects print output into a string and ignores drawing.
#[derive(Debug, Default)]
pub struct BufferHost {
    output: String,
}

impl BufferHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

impl Host for BufferHost {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn set_fill_style(&mut self, _r: f64, _g: f64, _b: f64) {}
    fn set_stroke_style(&mut self, _r: f64, _g: f64, _b: f64) {}
    fn rectangle(&mut self, _x0: f64, _y0: f64, _x1: f64, _y1: f64) {}
    fn begin_path(&mut self) {}
    fn move_to(&mut self, _x: f64, _y: f64) {}
    fn line_to(&mut self, _x: f64, _y: f64) {}
    fn stroke(&mut self) {}
    fn rotate(&mut self, _angle: f64) {}
    fn translate(&mut self, _x: f64, _y: f64) {}
    fn save(&mut self) {}
    fn restore(&mut self) {}
}

/// One observed host call, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Print(String),
    SetFillStyle(f64, f64, f64),
    SetStrokeStyle(f64, f64, f64),
    Rectangle(f64, f64, f64, f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke,
    Rotate(f64),
    Translate(f64, f64),
    Save,
    Restore,
}

/// Records every host call in order, for tests and tracing tools.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls observed so far, in execution order.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Concatenation of just the print calls.
    pub fn output(&self) -> String {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Print(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Host for RecordingHost {
    fn print(&mut self, text: &str) {
        self.calls.push(HostCall::Print(text.to_string()));
    }

    fn set_fill_style(&mut self, r: f64, g: f64, b: f64) {
        self.calls.push(HostCall::SetFillStyle(r, g, b));
    }

    fn set_stroke_style(&mut self, r: f64, g: f64, b: f64) {
        self.calls.push(HostCall::SetStrokeStyle(r, g, b));
    }

    fn rectangle(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.calls.push(HostCall::Rectangle(x0, y0, x1, y1));
    }

    fn begin_path(&mut self) {
        self.calls.push(HostCall::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(HostCall::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(HostCall::LineTo(x, y));
    }

    fn stroke(&mut self) {
        self.calls.push(HostCall::Stroke);
    }

    fn rotate(&mut self, angle: f64) {
        self.calls.push(HostCall::Rotate(angle));
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.calls.push(HostCall::Translate(x, y));
    }

    fn save(&mut self) {
        self.calls.push(HostCall::Save);
    }

    fn restore(&mut self) {
        self.calls.push(HostCall::Restore);
    }
}
