// RoundWatch — Tasks

pub mod board;
