use crate::shell::command::Command;

pub fn parse_command(input: &str) -> Option<Command> {
    let tokens: Vec<&str> = input.split_ascii_whitespace().collect();
    let (&cmd, args) = tokens.split_first()?;

    match cmd {
        "help" => Some(Command::Help),
        "put" => args.first().map(|&path| Command::Put(path.to_string())),
        "get" => args.first().map(|&name| Command::Get {
            name: name.to_string(),
            dest: args.get(1).map(|s| s.to_string()),
        }),
        "del" => args.first().map(|&name| Command::Del(name.to_string())),
        "list" => Some(Command::List),
        "df" => Some(Command::Df),
        "stat" => args.first().map(|&name| Command::Stat(name.to_string())),
        "format" => Some(Command::Format),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}
