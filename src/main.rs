//! bmofdec - decompress Binary MOF files.
//!
//! Reads a BMOF container from a file or stdin, writes the decompressed
//! MOF data to a file or stdout. Mirrors the classic mofdecomp redirection
//! contract: omitted arguments fall back to whichever standard stream is
//! not an interactive terminal.

use std::env;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::process::ExitCode;

use bmof_stream::{BmofError, ContainerHeaderParser, MofDecoder};

fn print_usage(prog: &str) {
    eprintln!("Usage: {} [input_file] [output_file]", prog);
    eprintln!();
    eprintln!("Decompress the Binary MOF file input_file into output_file.");
    eprintln!();
    eprintln!("input_file and output_file can be replaced by redirections or");
    eprintln!("pipes of the standard input/output. If only one argument is");
    eprintln!("specified, the other will be assumed to be whichever redirection");
    eprintln!("is available. If there aren't enough parameters available, this");
    eprintln!("usage message is shown.");
    eprintln!();
    eprintln!("Example usages:");
    eprintln!("\t{} file_in file_out", prog);
    eprintln!("\t{} file_in > file_out", prog);
    eprintln!("\t{} file_out < file_in", prog);
    eprintln!("\tcat file_in | {} | cat", prog);
}

/// Decide where input and output come from.
///
/// `None` means the combination is ambiguous and usage should be printed.
/// Inside the tuple, `None` stands for the corresponding standard stream.
fn organise_io(args: &[String]) -> Option<(Option<&str>, Option<&str>)> {
    let stdin_tty = io::stdin().is_terminal();
    let stdout_tty = io::stdout().is_terminal();

    match args {
        [] => {
            if stdin_tty || stdout_tty {
                None
            } else {
                Some((None, None))
            }
        }
        [single] => {
            if stdin_tty && !stdout_tty {
                Some((Some(single.as_str()), None))
            } else if stdout_tty && !stdin_tty {
                Some((None, Some(single.as_str())))
            } else {
                None
            }
        }
        [input, output] => Some((Some(input.as_str()), Some(output.as_str()))),
        _ => None,
    }
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>, BmofError> {
    match path {
        Some(p) => Ok(fs::read(p)?),
        None => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            Ok(data)
        }
    }
}

fn write_output(path: Option<&str>, data: &[u8]) -> Result<(), BmofError> {
    match path {
        Some(p) => fs::write(p, data)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run(input: Option<&str>, output: Option<&str>) -> Result<(), BmofError> {
    let data = read_input(input)?;

    let header = ContainerHeaderParser::parse(&data)?;
    eprintln!("Input data size is {} bytes", header.payload_size());

    if data.len() as u64 != u64::from(header.compressed_size) {
        return Err(BmofError::SizeMismatch {
            declared: u64::from(header.compressed_size),
            actual: data.len() as u64,
        });
    }

    let decoder = MofDecoder::new();
    let expanded = decoder.decompress(
        &data[ContainerHeaderParser::HEADER_SIZE..],
        header.decompressed_size as usize,
    )?;

    eprintln!("Input expanded to {} bytes", expanded.len());
    write_output(output, &expanded)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().map_or("bmofdec", String::as_str);

    let Some((input, output)) = organise_io(&args[1..]) else {
        print_usage(prog);
        return ExitCode::FAILURE;
    };

    match run(input, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", prog, e);
            ExitCode::FAILURE
        }
    }
}
