//! Prompt templates for the rule studio operations
//!
//! Placeholders use `{name}` and are filled in a single pass, so caller text
//! that happens to contain `{tags}` is never substituted again. Only
//! lowercase identifiers count as placeholders, which leaves the literal JSON
//! braces in the validation template alone.

use crate::studio::types::GenerateRuleRequest;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Falco field and macro cheat sheet shared by every system prompt
pub const FIELD_REFERENCE: &str = r#"## Common Falco Fields

### Process Fields
- `proc.name` - Process name
- `proc.exe` - Process executable path
- `proc.cmdline` - Full command line
- `proc.pid` - Process ID
- `proc.ppid` - Parent process ID
- `proc.pname` - Parent process name
- `proc.aname[n]` - Ancestor process name at depth n

### File/FD Fields
- `fd.name` - File descriptor name (file path or network address)
- `fd.directory` - Directory of the file descriptor
- `fd.filename` - Filename part of the file descriptor
- `fd.typechar` - Type: 'f'=file, '4'=IPv4, '6'=IPv6, 'u'=unix

### Network Fields
- `fd.sip` - Server IP address
- `fd.cip` - Client IP address
- `fd.sport` - Server port
- `fd.cport` - Client port
- `fd.rip` - Remote IP address
- `fd.rport` - Remote port

### Container Fields
- `container.id` - Container ID (or 'host' if not in container)
- `container.name` - Container name
- `container.image.repository` - Container image repository
- `container.image.tag` - Container image tag

### Kubernetes Fields
- `k8s.pod.name` - Kubernetes pod name
- `k8s.ns.name` - Kubernetes namespace name
- `k8s.deployment.name` - Deployment name

### User Fields
- `user.name` - Username
- `user.uid` - User ID
- `user.loginuid` - Login user ID

### Event Fields
- `evt.type` - Event type (execve, open, connect, etc.)
- `evt.dir` - Direction: '>' = enter, '<' = exit

### Syscall Macros
- `spawned_process` - A new process was spawned
- `container` - Event is in a container
- `outbound` - Outbound network connection
- `inbound` - Inbound network connection
- `open_write` - File opened for writing

## Priority Levels (highest to lowest)
EMERGENCY, ALERT, CRITICAL, ERROR, WARNING, NOTICE, INFORMATIONAL, DEBUG
"#;

const SYSTEM_PREAMBLE: &str = r#"You are a Falco security expert. Falco is a CNCF graduated cloud-native runtime security tool.
You have deep expertise in writing, explaining, and optimizing Falco rules.

Falco rules are written in YAML and use a custom condition language based on sysdig filter expressions.
"#;

const RULE_LANGUAGE_GUIDE: &str = r#"## Rule Structure
```yaml
- rule: <rule_name>
  desc: <description>
  condition: <condition_expression>
  output: <output_format_string>
  priority: <EMERGENCY|ALERT|CRITICAL|ERROR|WARNING|NOTICE|INFORMATIONAL|DEBUG>
  tags: [<tag1>, <tag2>]
```

## Macros (reusable conditions)
```yaml
- macro: container
  condition: (container.id != host)
```

## Lists (reusable value sets)
```yaml
- list: shell_binaries
  items: [bash, sh, zsh, ksh, fish]
```

Always produce syntactically valid Falco YAML. Include macros and lists when they improve readability.
Use MITRE ATT&CK tags (e.g., mitre_execution, mitre_persistence) when applicable.
"#;

/// Appended to the system message for the conversational assistant
pub const CHAT_ADDENDUM: &str = "You are also acting as an interactive assistant. Help users understand Falco, write rules, debug issues, and learn security best practices.";

/// Domain system message used by every operation
pub fn system_message() -> String {
    format!("{SYSTEM_PREAMBLE}\n{FIELD_REFERENCE}\n{RULE_LANGUAGE_GUIDE}")
}

/// System message for the chat assistant
pub fn chat_system_message() -> String {
    format!("{}\n\n{}", system_message(), CHAT_ADDENDUM)
}

/// Prompt template for generating a Falco rule file
pub const GENERATE_PROMPT: &str = r#"Generate a complete, production-ready Falco rule for the following security requirement:

**Security Requirement**: {description}
**Deployment Context**: {context}
**Desired Severity**: {severity}
**Additional Tags**: {tags}

Requirements:
1. Output ONLY valid Falco YAML (no markdown code blocks, no extra text)
2. Include any necessary macros and lists before the rule
3. Make conditions specific enough to minimize false positives
4. Add MITRE ATT&CK tags where applicable
5. Use descriptive output strings with relevant field interpolations
6. Add comments explaining non-obvious condition logic

Produce a complete, copy-paste ready Falco rule file."#;

/// Prompt template for explaining a rule file in five fixed sections
pub const EXPLAIN_PROMPT: &str = r#"Explain the following Falco rule(s) in clear, accessible language for a DevOps engineer who may not be a security expert.

**Falco Rule YAML**:
```yaml
{rule_yaml}
```

Provide your explanation in this exact structure:
## What This Rule Does
[Plain English explanation of the security behavior being detected]

## When It Triggers
[Specific conditions that would cause an alert]

## Why It Matters (Security Impact)
[The attack scenarios or risks this protects against, with MITRE ATT&CK references if applicable]

## Example Alert Output
[Show what an actual Falco alert from this rule might look like]

## Tuning Recommendations
[How to customize the rule to reduce false positives or expand coverage]"#;

/// Prompt template for the model's half of validation
pub const VALIDATE_PROMPT: &str = r#"Analyze this Falco rule YAML for correctness and best practices:

```yaml
{rule_yaml}
```

Check for:
1. YAML syntax validity
2. Required fields (rule, desc, condition, output, priority)
3. Valid priority levels
4. Condition syntax correctness
5. Output string field reference validity
6. Best practice violations

Respond in this EXACT JSON format (no markdown, just raw JSON, no other keys):
{
  "valid": true/false,
  "errors": ["error1", "error2"],
  "warnings": ["warning1", "warning2"],
  "suggestions": ["suggestion1", "suggestion2"],
  "score": 0-100
}"#;

/// Prompt template for optimizing a rule file
pub const OPTIMIZE_PROMPT: &str = r#"Review and optimize this Falco rule for performance and effectiveness:

```yaml
{rule_yaml}
```

Analyze:
1. **Performance**: Are there expensive condition checks that could be reordered or simplified?
2. **False Positives**: Are conditions too broad? Suggest more specific filters.
3. **Coverage**: Are there gaps in detection coverage?
4. **Style**: Does it follow Falco community conventions?

Then provide:
1. The optimized rule YAML
2. A summary of changes made

Format your response as:
### Optimized Rule
```yaml
[optimized yaml here]
```

### Changes Made
- [change 1]
- [change 2]"#;

/// Replace every known `{name}` in `template` with `lookup(name)`.
///
/// Unknown names are left as written.
fn fill<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match lookup(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Fill a template that only takes the rule file
pub fn with_rule_yaml(template: &str, rule_yaml: &str) -> String {
    fill(template, |name| (name == "rule_yaml").then_some(rule_yaml))
}

/// Build the generation prompt from a request, applying its defaults
pub fn generate_prompt(request: &GenerateRuleRequest) -> String {
    let tags = request.tags_text();
    fill(GENERATE_PROMPT, |name| match name {
        "description" => Some(request.description.as_str()),
        "context" => Some(request.context_or_default()),
        "severity" => Some(request.severity_or_default()),
        "tags" => Some(tags.as_str()),
        _ => None,
    })
}
