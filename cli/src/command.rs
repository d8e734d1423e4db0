use anyhow::{anyhow, bail, Context, Result};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(String),
    List(usize),
    Toggle,
    Next,
    Previous,
    Loop,
    Shuffle,
    Clear,
    Seek(u64),
    Tick(u64),
    Status,
    Quit,
}

fn number<T>(arg: Option<&str>, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let arg = arg.ok_or_else(|| anyhow!("missing {}", what))?;
    arg.parse()
        .with_context(|| format!("{} must be a number, got {:?}", what, arg))
}

impl Command {
    pub fn parse(line: &str) -> Result<Command> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let arg = words.next();

        Ok(match name {
            "play" => Command::Play(
                arg.ok_or_else(|| anyhow!("missing episode id"))?
                    .to_owned(),
            ),
            "list" => match arg {
                Some(_) => Command::List(number(arg, "index")?),
                None => Command::List(0),
            },
            "toggle" | "p" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "loop" => Command::Loop,
            "shuffle" => Command::Shuffle,
            "clear" => Command::Clear,
            "seek" => Command::Seek(number(arg, "position")?),
            "tick" => Command::Tick(number(arg, "seconds")?),
            "status" | "" => Command::Status,
            "quit" | "q" => Command::Quit,
            other => bail!("unknown command {:?}", other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            Command::parse("play a-economia").unwrap(),
            Command::Play(String::from("a-economia"))
        );
        assert_eq!(Command::parse("list").unwrap(), Command::List(0));
        assert_eq!(Command::parse("list 3").unwrap(), Command::List(3));
        assert_eq!(Command::parse("  seek  90 ").unwrap(), Command::Seek(90));
        assert_eq!(Command::parse("n").unwrap(), Command::Next);
        assert_eq!(Command::parse("").unwrap(), Command::Status);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse("play").is_err());
        assert!(Command::parse("tick soon").is_err());
        assert!(Command::parse("rewind").is_err());
        assert!(Command::parse("list -1").is_err());
        assert!(Command::parse("list 99999999999999999999999").is_err());
    }
}
