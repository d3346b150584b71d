use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

/// 交互式输入来源
pub trait Prompter {
    /// 询问是/否，仅 "y"/"yes"（不区分大小写）视为是
    fn ask_yes_no(&mut self, question: &str) -> Result<bool>;

    /// 询问一行文本，返回去除首尾空白后的内容
    fn ask_line(&mut self, question: &str) -> Result<String>;
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// 基于终端（或任意 BufRead/Write）的实现
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("error reading input")?;
        if read == 0 {
            bail!("error reading input: unexpected end of input");
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_answer(question)?;
        Ok(is_affirmative(&answer))
    }

    fn ask_line(&mut self, question: &str) -> Result<String> {
        let answer = self.read_answer(question)?;
        Ok(answer.trim().to_string())
    }
}
