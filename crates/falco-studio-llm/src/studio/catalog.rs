//! Bundled example rules and generation prompts for the UI

use serde::Serialize;

/// A ready-made rule shown in the UI
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExampleRule {
    pub title: &'static str,
    pub description: &'static str,
    pub yaml: &'static str,
}

pub const EXAMPLE_RULES: &[ExampleRule] = &[
    ExampleRule {
        title: "Detect Shell in Container",
        description: "Alert when a shell process is spawned inside a container",
        yaml: r#"- rule: Shell spawned in a container
  desc: >
    A shell was spawned by a non-shell application inside a container.
    This may indicate an attacker is using the container to run arbitrary commands.
  condition: >
    spawned_process and container and
    shell_procs and
    not proc.pname in (shell_binaries)
  output: >
    Shell spawned in a container
    (user=%user.name user_loginuid=%user.loginuid
     %container.info shell=%proc.name parent=%proc.pname
     cmdline=%proc.cmdline pid=%proc.pid image=%container.image.repository)
  priority: WARNING
  tags: [container, shell, mitre_execution, T1059]"#,
    },
    ExampleRule {
        title: "Unexpected Outbound Network Connection",
        description: "Alert on unexpected outbound network connections from containers",
        yaml: r#"- rule: Unexpected outbound connection destination
  desc: >
    Detect outbound network connections to unexpected IP addresses,
    which may indicate data exfiltration or C2 communication.
  condition: >
    outbound and
    not trusted_containers and
    not fd.sip in (allowed_outbound_destination_ipaddrs)
  output: >
    Unexpected outbound connection destination
    (user=%user.name command=%proc.cmdline connection=%fd.name
     container_id=%container.id image=%container.image.repository)
  priority: NOTICE
  tags: [network, mitre_exfiltration, T1041]"#,
    },
    ExampleRule {
        title: "Write Below /etc",
        description: "Alert when a process writes to /etc directory in a container",
        yaml: r#"- rule: Write below etc
  desc: >
    An attempt to write to /etc directory was detected inside a container.
    Attackers may modify system configuration to establish persistence.
  condition: >
    write_etc_common
  output: >
    File below /etc opened for writing
    (user=%user.name user_loginuid=%user.loginuid
     command=%proc.cmdline parent=%proc.pname file=%fd.name
     program=%proc.name gparent=%proc.aname[2]
     container_id=%container.id image=%container.image.repository)
  priority: ERROR
  tags: [filesystem, mitre_persistence, T1543]"#,
    },
];

pub const EXAMPLE_PROMPTS: &[&str] = &[
    "Alert when a process tries to read /etc/shadow or /etc/passwd inside a container",
    "Detect when kubectl is executed inside a pod",
    "Alert on any cryptocurrency mining process",
    "Detect when a container mounts a sensitive host directory like /proc or /sys",
    "Alert when more than 10 failed sudo attempts happen within a minute",
    "Detect when a new user is created on the system",
    "Alert when a process opens a reverse shell connection",
    "Detect when package managers (apt, yum, pip) run inside a container at runtime",
];
