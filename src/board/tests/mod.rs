mod draw;
mod movegen;
