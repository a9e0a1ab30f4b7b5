//! End-to-end checks of the monitoring pipeline, wired the way the binary
//! wires it but with scripted tool output instead of real processes.

#[cfg(test)]
mod pipeline;
