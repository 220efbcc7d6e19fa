use mock_interview::PermissionKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Status,
    Upload {
        name: String,
        size_bytes: u64,
        mime_type: String,
    },
    Remove,
    Next,
    Back,
    Grant(PermissionKind),
    Deny(PermissionKind),
    Start,
    Leave,
    Blur,
    Focus,
    Question,
    Lang(String),
    Stdin(String),
    Code,
    Clear,
    Run,
    Cancel,
    SignOut,
    Quit,
    Invalid { command: String, usage: &'static str },
    Unknown(String),
}

pub const HELP_TEXT: &str = "Commands: /help, /status, /upload <name> <bytes> <mime>, /remove, \
/next, /back, /grant <kind>, /deny <kind>, /start, /leave, /blur, /focus, /question, \
/lang <name|id>, /stdin <text>, /code, /clear, /run, /cancel, /signout, /quit. \
Other lines are appended to the code buffer.";

/// Parses one input line. Returns `None` for plain (non-command) lines.
pub fn parse_shell_command(input: &str) -> Option<ShellCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    let parsed = match command {
        "/help" => ShellCommand::Help,
        "/status" => ShellCommand::Status,
        "/upload" => parse_upload(rest),
        "/remove" => ShellCommand::Remove,
        "/next" => ShellCommand::Next,
        "/back" => ShellCommand::Back,
        "/grant" => parse_permission(command, rest, ShellCommand::Grant),
        "/deny" => parse_permission(command, rest, ShellCommand::Deny),
        "/start" => ShellCommand::Start,
        "/leave" => ShellCommand::Leave,
        "/blur" => ShellCommand::Blur,
        "/focus" => ShellCommand::Focus,
        "/question" => ShellCommand::Question,
        "/lang" if !rest.is_empty() => ShellCommand::Lang(rest.to_string()),
        "/lang" => invalid(command, "/lang <name|id>"),
        "/stdin" => ShellCommand::Stdin(rest.replace("\\n", "\n")),
        "/code" => ShellCommand::Code,
        "/clear" => ShellCommand::Clear,
        "/run" => ShellCommand::Run,
        "/cancel" => ShellCommand::Cancel,
        "/signout" => ShellCommand::SignOut,
        "/quit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(command.to_string()),
    };

    Some(parsed)
}

fn invalid(command: &str, usage: &'static str) -> ShellCommand {
    ShellCommand::Invalid {
        command: command.to_string(),
        usage,
    }
}

fn parse_upload(rest: &str) -> ShellCommand {
    const USAGE: &str = "/upload <name> <bytes> <mime>";

    let parts: Vec<&str> = rest.split_whitespace().collect();
    let [name, size, mime_type] = parts.as_slice() else {
        return invalid("/upload", USAGE);
    };
    let Ok(size_bytes) = size.parse::<u64>() else {
        return invalid("/upload", USAGE);
    };

    ShellCommand::Upload {
        name: (*name).to_string(),
        size_bytes,
        mime_type: (*mime_type).to_string(),
    }
}

fn parse_permission(
    command: &str,
    rest: &str,
    build: fn(PermissionKind) -> ShellCommand,
) -> ShellCommand {
    match rest.parse::<PermissionKind>() {
        Ok(kind) => build(kind),
        Err(_) => invalid(command, "<kind> is camera, microphone, or screenShare"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_not_commands() {
        assert_eq!(parse_shell_command("print('hi')"), None);
        assert_eq!(parse_shell_command("  # /run"), None);
    }

    #[test]
    fn upload_requires_three_arguments() {
        assert_eq!(
            parse_shell_command("/upload cv.pdf 2048 application/pdf"),
            Some(ShellCommand::Upload {
                name: "cv.pdf".to_string(),
                size_bytes: 2048,
                mime_type: "application/pdf".to_string(),
            })
        );
        assert!(matches!(
            parse_shell_command("/upload cv.pdf big application/pdf"),
            Some(ShellCommand::Invalid { .. })
        ));
        assert!(matches!(
            parse_shell_command("/upload cv.pdf"),
            Some(ShellCommand::Invalid { .. })
        ));
    }

    #[test]
    fn permission_commands_parse_kind() {
        assert_eq!(
            parse_shell_command("/grant screenShare"),
            Some(ShellCommand::Grant(PermissionKind::ScreenShare))
        );
        assert_eq!(
            parse_shell_command("/deny mic"),
            Some(ShellCommand::Deny(PermissionKind::Microphone))
        );
        assert!(matches!(
            parse_shell_command("/grant"),
            Some(ShellCommand::Invalid { .. })
        ));
    }

    #[test]
    fn stdin_unescapes_newlines() {
        assert_eq!(
            parse_shell_command("/stdin 1 2\\n3"),
            Some(ShellCommand::Stdin("1 2\n3".to_string()))
        );
        assert_eq!(
            parse_shell_command("/stdin"),
            Some(ShellCommand::Stdin(String::new()))
        );
    }

    #[test]
    fn unknown_command_keeps_name() {
        assert_eq!(
            parse_shell_command("/dance now"),
            Some(ShellCommand::Unknown("/dance".to_string()))
        );
    }
}
