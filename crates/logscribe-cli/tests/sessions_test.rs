use logscribe_testing::assertions::assert_session_ids;
use logscribe_testing::{SessionBuilder, TestWorld};

fn world_with_sessions() -> TestWorld {
    let world = TestWorld::new().enter_dir("app");
    world
        .write_session("app", "aaa-1", &SessionBuilder::new("aaa-1").user("one"), 100)
        .unwrap();
    world
        .write_session("app", "bbb-2", &SessionBuilder::new("bbb-2").user("two"), 300)
        .unwrap();
    world
        .write_session(
            "app",
            "agent-ccc",
            &SessionBuilder::new("bbb-2").sidechain(true).user("task"),
            200,
        )
        .unwrap();
    world
}

#[test]
fn test_sessions_of_current_project_newest_first() {
    let world = world_with_sessions();
    let result = world.run(&["sessions", "--format", "json"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let doc = result.json().unwrap();
    assert_session_ids(&doc, &["bbb-2", "agent-ccc", "aaa-1"]).unwrap();
    assert_eq!(doc["sessions"][1]["is_agent"], true);
    assert_eq!(doc["sessions"][1]["parent_session_id"], "bbb-2");
}

#[test]
fn test_sessions_exclude_agents_reverse_and_limit() {
    let world = world_with_sessions();

    let doc = world
        .run(&["sessions", "--exclude-agents", "--format", "json"])
        .unwrap()
        .json()
        .unwrap();
    assert_session_ids(&doc, &["bbb-2", "aaa-1"]).unwrap();

    let doc = world
        .run(&["sessions", "--reverse", "--format", "json"])
        .unwrap()
        .json()
        .unwrap();
    assert_session_ids(&doc, &["aaa-1", "agent-ccc", "bbb-2"]).unwrap();

    let doc = world
        .run(&["sessions", "--limit", "2", "--reverse", "--format", "json"])
        .unwrap()
        .json()
        .unwrap();
    assert_session_ids(&doc, &["agent-ccc", "bbb-2"]).unwrap();
}

#[test]
fn test_sessions_by_prefix_plain() {
    let world = world_with_sessions();
    let result = world.run(&["sessions", "agent-"]).unwrap();
    assert!(result.success());
    let lines: Vec<&str> = result.stdout().lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("agent-ccc  (agent of bbb-2)"));
}

#[test]
fn test_sessions_for_project_without_logs() {
    let world = TestWorld::new().enter_dir("empty");
    let result = world.run(&["sessions"]).unwrap();
    assert!(result.success());
    assert!(result.stdout().is_empty());
    assert!(result.stderr().contains("No sessions found"));
}

#[test]
fn test_projects_dir_flag_overrides_env() {
    let world = world_with_sessions();
    let other = world.temp_dir().join("elsewhere");
    std::fs::create_dir_all(&other).unwrap();

    let result = world
        .run(&["sessions", "bbb", "--projects-dir", other.to_str().unwrap()])
        .unwrap();
    assert!(result.success());
    assert!(result.stdout().is_empty());
}

#[test]
fn test_config_file_sets_exclude_agents() {
    let world = world_with_sessions();
    std::fs::write(world.temp_dir().join("config.toml"), "exclude_agents = true\n").unwrap();

    let doc = world
        .run(&["sessions", "--format", "json"])
        .unwrap()
        .json()
        .unwrap();
    assert_session_ids(&doc, &["bbb-2", "aaa-1"]).unwrap();
}
