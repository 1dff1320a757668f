use super::*;
use byteorder::ByteOrder;
use emu68::{continue_execution, Emulator, Endian, System};

mod operands;

pub(crate) fn assembled_words(source: &str) -> Vec<u16> {
    let mem = assemble(source).expect("program must assemble");
    let data = mem.data();
    assert_eq!(data.len() % 2, 0, "images are word streams");
    let mut words = vec![0u16; data.len() / 2];
    Endian::read_u16_into(data, &mut words);
    words
}

pub(crate) fn load(source: &str) -> Emulator {
    let mut emu = Emulator::new();
    assert_eq!(load_source(&mut emu, source), None);
    emu
}

pub(crate) fn run(source: &str) -> Emulator {
    let mut emu = load(source);
    continue_execution(&mut emu);
    emu
}

pub(crate) fn head(emu: &Emulator) -> &System {
    emu.states().last().expect("history is never empty")
}

pub(crate) fn step_n(emu: &mut Emulator, n: usize) {
    for i in 0..n {
        assert!(emu.step(), "step {} failed", i);
    }
}

pub(crate) fn parse_err(source: &str) -> ParserError {
    match parse(source, &ParserSettings::default()) {
        Err(err) => err,
        Ok(_) => panic!("expected {:?} to fail to parse", source),
    }
}

pub(crate) fn encode_err(source: &str) -> EncodeError {
    let program = parse(source, &ParserSettings::default()).expect("source must parse");
    match compile(&program) {
        Err(err) => err,
        Ok(_) => panic!("expected {:?} to fail to encode", source),
    }
}
