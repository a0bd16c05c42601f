//! Packet is for transferring control information between tasks and the scheduler.
//! It travels as the `usize` payload of a context switch.

use crate::task::BlockCause;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Packet {
    Yield,
    BlockOn(BlockCause),
    Finished,
}

impl Packet {
    pub(crate) fn encode(self) -> usize {
        match self {
            Packet::Yield => 0,
            Packet::Finished => 1,
            Packet::BlockOn(BlockCause::Lock) => 2,
            Packet::BlockOn(BlockCause::Semaphore) => 3,
            Packet::BlockOn(BlockCause::Sleep) => 4,
            Packet::BlockOn(BlockCause::Join) => 5,
        }
    }

    pub(crate) fn decode(raw: usize) -> Self {
        match raw {
            0 => Packet::Yield,
            1 => Packet::Finished,
            2 => Packet::BlockOn(BlockCause::Lock),
            3 => Packet::BlockOn(BlockCause::Semaphore),
            4 => Packet::BlockOn(BlockCause::Sleep),
            5 => Packet::BlockOn(BlockCause::Join),
            other => panic!("Corrupted packet {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_packet_survives_a_switch() {
        let packets = [
            Packet::Yield,
            Packet::Finished,
            Packet::BlockOn(BlockCause::Lock),
            Packet::BlockOn(BlockCause::Semaphore),
            Packet::BlockOn(BlockCause::Sleep),
            Packet::BlockOn(BlockCause::Join),
        ];
        for packet in packets {
            assert_eq!(Packet::decode(packet.encode()), packet);
        }
    }

    #[test]
    #[should_panic(expected = "Corrupted packet")]
    fn test_unknown_packet() {
        Packet::decode(99);
    }
}
