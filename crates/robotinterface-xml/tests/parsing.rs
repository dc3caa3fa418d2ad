// crates/robotinterface-xml/tests/parsing.rs

use robotinterface_xml::{
    ActionPhase, ActionType, Param, ReaderOptions, RobotReader, load_robot_from_file,
};
use std::fs;
use std::path::PathBuf;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Helper function to locate a test file in the `tests/data/` directory.
fn test_file(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);
    path
}

/// The full description pulls devices, parameters and actions out of three
/// included files (one of them nested two levels deep).
#[test]
fn test_read_robot_with_includes() {
    init_logger();
    let result = load_robot_from_file(test_file("icub_sim.xml"));
    assert!(
        result.success,
        "Parsing failed: {:?}",
        result.diagnostics
    );
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);

    let robot = &result.robot;
    assert_eq!(robot.name, "icubSim");
    assert_eq!(robot.build, 1);
    assert_eq!(robot.portprefix, "/icubSim");

    assert_eq!(
        robot.params,
        [
            Param::new("period", "10"),
            Param::group("network", "(host localhost) (port 10000)"),
        ]
    );

    let names: Vec<_> = robot.devices.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["left_arm_mc", "head_mc", "left_arm_calibrator"]);
}

#[test]
fn test_included_device_content() {
    init_logger();
    let result = load_robot_from_file(test_file("icub_sim.xml"));
    let arm = result
        .robot
        .device("left_arm_mc")
        .expect("left_arm_mc not found");

    assert_eq!(arm.device_type, "embObjMotionControl");
    assert_eq!(
        arm.params,
        [
            Param::new("robotName", "/icubSim"),
            Param::new("joints", "7"),
            Param::group("LIMITS", "(Max 90 160 80) (Min -90 0 -37)"),
            Param::new("subdevice", "canbus"),
            Param::new("canDeviceNum", "0"),
        ]
    );

    assert_eq!(arm.actions.len(), 2);
    let park = &arm.actions[1];
    assert_eq!(park.phase, ActionPhase::Shutdown);
    assert_eq!(park.action_type, ActionType::Park);
    assert_eq!(park.level, 5);
    assert_eq!(park.params, [Param::new("target", "left_arm_home")]);
}

#[test]
fn test_paramlist_and_actions_block() {
    init_logger();
    let result = load_robot_from_file(test_file("icub_sim.xml"));

    let head = result.robot.device("head_mc").unwrap();
    assert_eq!(
        head.params[2..],
        [
            Param::new("networks", "(head_joints)"),
            Param::new("head_joints", "0 5 0 5"),
        ]
    );

    let calibrator = result.robot.device("left_arm_calibrator").unwrap();
    assert_eq!(
        calibrator.find_param("GENERAL").map(|p| p.value.as_str()),
        Some("(joints 7)")
    );
    let startup = calibrator.actions_for_phase(ActionPhase::Startup);
    assert_eq!(startup.len(), 1);
    assert_eq!(startup[0].action_type, ActionType::Calibrate);
    assert_eq!(startup[0].params, [Param::new("target", "left_arm_mc")]);
    assert_eq!(
        calibrator.actions_for_phase(ActionPhase::Interrupt1)[0].action_type,
        ActionType::Abort
    );
}

/// Reading the same description from a string (after inlining the includes
/// by hand) produces the same model as reading it from disk.
#[test]
fn test_file_and_string_agree() {
    init_logger();
    let xml = r#"<robot name="icubSim" build="1" portprefix="/icubSim">
        <device name="left_arm_calibrator" type="parametricCalibrator">
            <param name="GENERAL">(joints 7)</param>
            <actions robot="icubSim" build="1">
                <action phase="startup" level="10" type="calibrate">
                    <param name="target">left_arm_mc</param>
                </action>
                <action phase="interrupt1" level="1" type="abort" />
            </actions>
        </device>
    </robot>"#;
    let from_str = RobotReader::default().read_str(xml);
    let from_file = load_robot_from_file(test_file("icub_sim.xml"));

    assert!(from_str.success);
    assert_eq!(
        from_str.robot.device("left_arm_calibrator"),
        from_file.robot.device("left_arm_calibrator")
    );
}

/// In verbose mode the resolved document is stored next to the input file.
#[test]
fn test_verbose_writes_preprocessor_log() {
    init_logger();
    let dir = std::env::temp_dir().join(format!("robotinterface-verbose-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("robot.xml"),
        r#"<robot name="R" build="2" portprefix="/R"><xi:include href="dev.xml"/></robot>"#,
    )
    .unwrap();
    fs::write(
        dir.join("dev.xml"),
        r#"<device xmlns:xi="http://www.w3.org/2001/XInclude" name="d" type="t"/>"#,
    )
    .unwrap();

    let reader = RobotReader::new(ReaderOptions::default().verbose(true));
    let result = reader.read_file(dir.join("robot.xml"));
    assert!(result.success);
    assert!(result.robot.has_device("d"));

    let log = fs::read_to_string(dir.join("robot_preprocessor_log.xml"))
        .expect("preprocessor log not written");
    assert!(log.contains(r#"<device name="d" type="t"/>"#));
    assert!(!log.contains("xi:include"));
    assert!(!log.contains("xmlns:xi"));
}
