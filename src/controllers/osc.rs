// src/controllers/osc.rs
// OSC Controller
//
// Remote control of the matrix. Every keyboard action in the app goes
// through here too: keys are sent to our own port and come back as
// commands, so local and remote input share one path.

use nannou_osc as osc;
use std::error::Error;
use tracing::warn;

use crate::models::{Axis, Selection};

#[derive(Debug, Clone, PartialEq)]
pub enum OscCommand {
    Transpose,
    Drop { selection: Selection },
    Highlight { selection: Selection },
    ClearHighlights,
    GhostMove { selection: Selection, dx: f32, dy: f32 },
}

pub struct OscController {
    command_queue: Vec<OscCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self, Box<dyn Error>> {
        let receiver = osc::receiver(port)?;

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                if let Some(command) = parse_message(&message) {
                    self.command_queue.push(command);
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<OscCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

/// Decode one message. Unknown addresses and bad arguments are logged
/// and yield `None`.
pub fn parse_message(message: &osc::Message) -> Option<OscCommand> {
    let command = match message.addr.as_str() {
        "/matrix/transpose" => Some(OscCommand::Transpose),
        "/matrix/clear_highlights" => Some(OscCommand::ClearHighlights),
        "/matrix/drop" => match &message.args[..] {
            [osc::Type::String(axis), osc::Type::Int(index)] => {
                selection(axis, *index).map(|selection| OscCommand::Drop { selection })
            }
            _ => None,
        },
        "/matrix/highlight" => match &message.args[..] {
            [osc::Type::String(axis), osc::Type::Int(index)] => {
                selection(axis, *index).map(|selection| OscCommand::Highlight { selection })
            }
            _ => None,
        },
        "/matrix/ghost_move" => match &message.args[..] {
            [osc::Type::String(axis), osc::Type::Int(index), osc::Type::Float(dx), osc::Type::Float(dy)] => {
                selection(axis, *index).map(|selection| OscCommand::GhostMove {
                    selection,
                    dx: *dx,
                    dy: *dy,
                })
            }
            _ => None,
        },
        _ => {
            warn!("Unknown OSC address pattern: {}", message.addr);
            return None;
        }
    };

    if command.is_none() {
        warn!(
            "Ignoring OSC message {} with arguments {:?}",
            message.addr, message.args
        );
    }
    command
}

fn selection(axis: &str, index: i32) -> Option<Selection> {
    let axis: Axis = axis.parse().ok()?;
    let index = usize::try_from(index).ok()?;
    Some(Selection::new(index, axis))
}

pub struct OscSender {
    sender: osc::Sender,
    target_addr: String,
    target_port: u16,
}

impl OscSender {
    pub fn new(target_port: u16) -> Result<Self, Box<dyn Error>> {
        let target_addr = "127.0.0.1".to_string();
        let sender = osc::sender()?;

        Ok(Self {
            sender,
            target_addr,
            target_port,
        })
    }

    fn send(&self, addr: &str, args: Vec<osc::Type>) {
        if let Err(e) = self.sender.send(
            (addr.to_string(), args),
            (self.target_addr.as_str(), self.target_port),
        ) {
            warn!("Failed to send {}: {:?}", addr, e);
        }
    }

    pub fn send_transpose(&self) {
        self.send("/matrix/transpose", Vec::new());
    }

    pub fn send_drop(&self, selection: Selection) {
        self.send("/matrix/drop", selection_args(selection));
    }

    pub fn send_highlight(&self, selection: Selection) {
        self.send("/matrix/highlight", selection_args(selection));
    }

    pub fn send_clear_highlights(&self) {
        self.send("/matrix/clear_highlights", Vec::new());
    }

    pub fn send_ghost_move(&self, selection: Selection, dx: f32, dy: f32) {
        let mut args = selection_args(selection);
        args.push(osc::Type::Float(dx));
        args.push(osc::Type::Float(dy));
        self.send("/matrix/ghost_move", args);
    }
}

fn selection_args(selection: Selection) -> Vec<osc::Type> {
    vec![
        osc::Type::String(selection.axis.to_string()),
        osc::Type::Int(selection.index as i32),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(addr: &str, args: Vec<osc::Type>) -> osc::Message {
        osc::Message {
            addr: addr.to_string(),
            args,
        }
    }

    #[test]
    fn test_parse_commands_without_arguments() {
        assert_eq!(
            parse_message(&message("/matrix/transpose", vec![])),
            Some(OscCommand::Transpose)
        );
        assert_eq!(
            parse_message(&message("/matrix/clear_highlights", vec![])),
            Some(OscCommand::ClearHighlights)
        );
    }

    #[test]
    fn test_parse_drop_and_highlight() {
        let args = vec![osc::Type::String("column".into()), osc::Type::Int(2)];
        assert_eq!(
            parse_message(&message("/matrix/drop", args.clone())),
            Some(OscCommand::Drop {
                selection: Selection::column(2)
            })
        );
        assert_eq!(
            parse_message(&message("/matrix/highlight", args)),
            Some(OscCommand::Highlight {
                selection: Selection::column(2)
            })
        );
    }

    #[test]
    fn test_parse_ghost_move() {
        let args = vec![
            osc::Type::String("row".into()),
            osc::Type::Int(1),
            osc::Type::Float(24.0),
            osc::Type::Float(-24.0),
        ];
        assert_eq!(
            parse_message(&message("/matrix/ghost_move", args)),
            Some(OscCommand::GhostMove {
                selection: Selection::row(1),
                dx: 24.0,
                dy: -24.0,
            })
        );
    }

    #[test]
    fn test_rejects_bad_messages() {
        // negative index
        let negative = vec![osc::Type::String("row".into()), osc::Type::Int(-1)];
        assert_eq!(parse_message(&message("/matrix/drop", negative)), None);

        // unknown axis
        let diagonal = vec![osc::Type::String("diagonal".into()), osc::Type::Int(0)];
        assert_eq!(parse_message(&message("/matrix/highlight", diagonal)), None);

        // wrong argument types
        let floats = vec![osc::Type::Float(1.0), osc::Type::Float(2.0)];
        assert_eq!(parse_message(&message("/matrix/drop", floats)), None);

        assert_eq!(parse_message(&message("/grid/rotate", vec![])), None);
    }

    #[test]
    fn test_selection_args_round_trip_through_parser() {
        let args = selection_args(Selection::row(3));
        assert_eq!(
            parse_message(&message("/matrix/drop", args)),
            Some(OscCommand::Drop {
                selection: Selection::row(3)
            })
        );
    }
}
