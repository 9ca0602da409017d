/// Name of the built-in tool the assistant uses to delegate work to a sub-agent.
pub const DELEGATION_TOOL_NAME: &str = "Task";

/// Check whether a tool call spawns a sub-agent.
///
/// A tool counts as a sub-agent call when its name is exactly
/// [`DELEGATION_TOOL_NAME`] or contains the substring `agent`
/// (case-sensitive). This is a naming heuristic, not a classifier: unrelated
/// tools whose names contain `agent` are reported as sub-agent calls too.
///
/// Every place that needs sub-agent status goes through this function.
pub fn is_sub_agent_tool(name: &str) -> bool {
    name == DELEGATION_TOOL_NAME || name.contains("agent")
}
