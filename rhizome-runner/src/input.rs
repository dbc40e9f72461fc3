//! Line-oriented interaction commands, for driving the rhizome without a
//! browser attached.

use crossbeam_channel::Sender;
use log::{debug, warn};
use rhizome_transport::InteractionEvent;
use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

/// Forward every `add x y [z]` or `resize w h [d]` line from `reader` until
/// EOF or until the receiving side hangs up. Returns the number of events
/// forwarded.
pub fn read_commands<R: BufRead>(reader: R, events: &Sender<InteractionEvent>) -> usize {
    let mut forwarded = 0;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Stopped reading commands: {}", e);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match InteractionEvent::from_command(line) {
            Some(event) => {
                if events.send(event).is_err() {
                    break;
                }
                forwarded += 1;
            }
            None => warn!(
                "Unrecognised command: {:?} (expected `add <x> <y> [z]` or `resize <w> <h> [d]`)",
                line
            ),
        }
    }
    debug!("Command reader finished after {} events", forwarded);
    forwarded
}

pub fn spawn_stdin_reader(events: Sender<InteractionEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-commands".into())
        .spawn(move || {
            read_commands(io::stdin().lock(), &events);
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn forwards_valid_lines_and_skips_the_rest() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let input = Cursor::new("add 1 2\n\nnonsense\nadd -3 4 5\nresize 300 200\n");
        assert_eq!(read_commands(input, &tx), 3);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                InteractionEvent::Add { x: 1.0, y: 2.0, z: None },
                InteractionEvent::Add { x: -3.0, y: 4.0, z: Some(5.0) },
                InteractionEvent::Resize { width: 300.0, height: 200.0, depth: None },
            ]
        );
    }

    #[test]
    fn stops_when_receiver_is_gone() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        assert_eq!(read_commands(Cursor::new("add 1 2\nadd 3 4\n"), &tx), 0);
    }
}
