#[macro_use]
extern crate afl;

use aivdm::{AisMessage, Parser};

const POSITION_REPORT: &[u8] = b"!AIVDM,1,1,,A,15RTgt0PAso;90TKcjM8h6g208CQ,0*4A\r\n";

fn parse(chunksize: usize, data: &[u8]) {
    let mut parser = Parser::default();
    for chunk in data.chunks(chunksize) {
        // Any error is fine here, the parser just has to keep going
        for _result in parser.consume(chunk) {}
    }

    // Flush whatever partial line the garbage left behind
    for _result in parser.consume(b"\n") {}

    let mut num_reports = 0;
    for result in parser.consume(POSITION_REPORT) {
        match result {
            Ok(AisMessage::PositionReport(report)) => {
                assert_eq!(report.header.mmsi, 371_798_000);
                num_reports += 1;
            },
            Ok(other) => panic!("unexpected message {:?}", other),
            Err(_) => {},
        }
    }
    assert_eq!(num_reports, 1);
    assert!(parser.is_buffer_empty());
}

fn main() {
    fuzz!(|data: &[u8]| {
        if data.len() > 1 {
            let chunksize = data[0] as usize;
            if chunksize != 0 {
                parse(chunksize, &data[1..]);
            }
        }
    });
}
