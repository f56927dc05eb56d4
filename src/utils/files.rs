use std::path::Path;

use tokio::{
    fs::File,
    io::{self, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter},
};

/// A buffered line writer over a file or stdout
pub type LineWriter = BufWriter<Box<dyn AsyncWrite + Send + Unpin>>;

/// Read the non-blank lines of a file, paired with their 1-based line numbers
pub async fn read_lines(path: impl AsRef<Path>) -> io::Result<Vec<(usize, String)>> {
    let f = File::open(path).await?;
    let mut lines = BufReader::new(f).lines();

    let mut result = Vec::new();
    let mut number = 0;

    while let Some(line) = lines.next_line().await? {
        number += 1;

        if !line.trim().is_empty() {
            result.push((number, line));
        }
    }

    Ok(result)
}

/// Open a line writer for `path`, replacing any existing contents, or for stdout if no path is
/// given
pub async fn line_writer(path: Option<impl AsRef<Path>>) -> io::Result<LineWriter> {
    let inner: Box<dyn AsyncWrite + Send + Unpin> = match path {
        Some(path) => Box::new(File::create(path).await?),
        None => Box::new(io::stdout()),
    };

    Ok(BufWriter::new(inner))
}

/// Append each line to the writer, newline-terminated
pub async fn write_lines<W, I, S>(w: &mut W, lines: I) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        w.write_all(line.as_ref().as_bytes()).await?;
        w.write_all(b"\n").await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_write_then_read_skips_blank_lines() {
        let path = std::env::temp_dir().join(format!("span-aligner-files-{}.txt", std::process::id()));

        let mut w = line_writer(Some(&path)).await.unwrap();
        write_lines(&mut w, ["first", ""]).await.unwrap();
        write_lines(&mut w, ["  ", "second"]).await.unwrap();
        w.flush().await.unwrap();
        drop(w);

        let lines = read_lines(&path).await.unwrap();

        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(
            lines,
            vec![(1, "first".to_string()), (4, "second".to_string())]
        );
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let result = read_lines("does/not/exist.jsonl").await;

        assert!(result.is_err());
    }
}
