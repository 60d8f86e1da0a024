//! Request metadata supplied by the HTTP layer.

/// The parts of the current request that appear in a problem document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestMetadata {
    pub protocol: String,
    pub method: String,
    pub path: String,
    pub trace_id: String,
}

impl RequestMetadata {
    #[must_use]
    pub fn new(
        protocol: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        trace_id: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            method: method.into(),
            path: path.into(),
            trace_id: trace_id.into(),
        }
    }

    /// Instance descriptor: `"{protocol} {method} {path}"`.
    #[must_use]
    pub fn instance(&self) -> String {
        format!("{} {} {}", self.protocol, self.method, self.path)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn instance_joins_protocol_method_path() {
        let request = RequestMetadata::new("HTTP/1.1", "GET", "/users/42", "trace-1");
        assert_eq!(request.instance(), "HTTP/1.1 GET /users/42");
    }
}
