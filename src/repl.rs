//! Interactive chat loop
//!
//! The conversation lives in memory for the lifetime of the loop and is
//! passed as history on every turn. Nothing is written to disk.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{adapter::ChatPlatform, error::Result, messages::Message};

const PROMPT: &str = "> ";

/// Drive `platform` with lines read from `input` until EOF or `/exit`
///
/// Failed turns are reported on `output` and leave the history untouched.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails
pub async fn run<R, W>(platform: &dyn ChatPlatform, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut history: Vec<Message> = Vec::new();
    let mut lines = input.lines();

    output
        .write_all(
            format!(
                "Chatting with {} ({}). /reset clears the conversation, /exit quits.\n",
                platform.model(),
                platform.provider()
            )
            .as_bytes(),
        )
        .await?;

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            "/exit" | "/quit" => break,
            "/reset" => {
                history.clear();
                output.write_all(b"Conversation cleared.\n").await?;
                continue;
            }
            _ => {}
        }

        match platform.chat(line, &history).await {
            Ok(reply) => {
                output.write_all(reply.as_bytes()).await?;
                output.write_all(b"\n").await?;
                history.push(Message::user(line));
                history.push(Message::model(reply));
            }
            Err(e) => {
                output.write_all(format!("error: {e}\n").as_bytes()).await?;
            }
        }
    }

    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes the prompt and records the history length it was given
    #[derive(Default)]
    struct EchoPlatform {
        seen: Mutex<Vec<Vec<Message>>>,
    }

    #[async_trait]
    impl ChatPlatform for EchoPlatform {
        fn provider(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn chat(&self, prompt: &str, history: &[Message]) -> Result<String> {
            self.seen.lock().unwrap().push(history.to_vec());
            if prompt == "fail" {
                return Err(ChatError::RemoteApi {
                    code: 500,
                    status: None,
                    message: "boom".into(),
                });
            }
            Ok(format!("echo: {prompt}"))
        }
    }

    async fn run_script(script: &str) -> (EchoPlatform, String) {
        let platform = EchoPlatform::default();
        let mut output = Vec::new();
        run(&platform, script.as_bytes(), &mut output).await.unwrap();
        (platform, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_history_accumulates() {
        let (platform, output) = run_script("hi\nhow are you?\n").await;

        assert!(output.contains("echo: hi"));
        assert!(output.contains("echo: how are you?"));

        let seen = platform.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].is_empty());
        assert_eq!(
            seen[1],
            vec![Message::user("hi"), Message::model("echo: hi")]
        );
    }

    #[tokio::test]
    async fn test_reset_and_exit() {
        let (platform, output) = run_script("one\n/reset\ntwo\n/exit\nnever sent\n").await;

        assert!(output.contains("Conversation cleared."));
        assert!(!output.contains("never sent"));

        let seen = platform.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[1].is_empty());
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_history_and_continues() {
        let (platform, output) = run_script("fail\n\n   \nafter\n").await;

        assert!(output.contains("error: API call failed: boom"));
        assert!(output.contains("echo: after"));

        let seen = platform.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[1].is_empty());
    }
}
