use aivdm::{
    AisMessage, ClassBFlags, DecodeError, Decoder, NavigationStatus, Parser, Severity, ShipType,
    TimeStamp,
};

const POSITION_REPORT: &str = "!AIVDM,1,1,,A,15RTgt0PAso;90TKcjM8h6g208CQ,0*4A";
const STATIC_VOYAGE_1: &str = "!AIVDM,2,1,1,A,55?MbV02>H97VhLH@0@BjT@Dl4pT@ThpUm0hE:22222220U0p>2334o7000000000000000000,0*42";
const STATIC_VOYAGE_2: &str = "!AIVDM,2,2,1,A,00000000000,2*25";
const CLASS_B: &str = "!AIVDM,1,1,,B,B5NLCa000>fdwUlSKF2awoUkP06,0*4D";

/// `!{body}*hh` with a correct checksum
fn frame(body: &str) -> String {
    let ck = body.bytes().fold(0u8, |ck, b| ck ^ b);
    format!("!{}*{:02X}", body, ck)
}

#[test]
fn test_position_report() {
    let decoder = Decoder::new();
    let Some(AisMessage::PositionReport(msg)) = decoder.decode(POSITION_REPORT).unwrap() else {
        panic!("expected a position report");
    };
    assert_eq!(msg.header.message_type, 1);
    assert_eq!(msg.header.mmsi, 371_798_000);
    assert_eq!(msg.navigation_status, NavigationStatus::UnderWayUsingEngine);
    let lat = msg.latitude.unwrap();
    let lon = msg.longitude.unwrap();
    assert!((-90.0..=90.0).contains(&lat));
    assert!((-180.0..=180.0).contains(&lon));
    assert!((lat - 48.381_633).abs() < 1e-5);
    assert!((lon - -123.395_383).abs() < 1e-5);
    assert_eq!(msg.speed_over_ground, Some(12.3));
    assert_eq!(msg.course_over_ground, Some(224.0));
    assert_eq!(msg.true_heading, Some(215));
    assert_eq!(msg.timestamp, TimeStamp::Second(33));
}

#[test]
fn test_static_voyage_needs_both_fragments() {
    let decoder = Decoder::new();
    assert_eq!(decoder.decode(STATIC_VOYAGE_1).unwrap(), None);
    assert_eq!(decoder.reassembler().pending(), 1);

    let Some(AisMessage::StaticVoyageData(msg)) = decoder.decode(STATIC_VOYAGE_2).unwrap() else {
        panic!("expected static and voyage data");
    };
    assert_eq!(msg.header.message_type, 5);
    assert_eq!(msg.header.mmsi, 351_759_000);
    assert_eq!(msg.imo_number, Some(9_330_833));
    assert_eq!(msg.vessel_type, Some(ShipType(130)));
    assert_eq!(decoder.reassembler().pending(), 0);
}

#[test]
fn test_class_b_position_report() {
    let decoder = Decoder::new();
    let Some(AisMessage::ClassBPositionReport(msg)) = decoder.decode(CLASS_B).unwrap() else {
        panic!("expected a class B position report");
    };
    assert_eq!(msg.header.message_type, 18);
    assert_eq!(msg.header.mmsi, 367_465_380);
    assert!(msg.position_accuracy);
    assert!(!msg.raim_flag);
    assert_eq!(
        msg.flags,
        ClassBFlags::DISPLAY | ClassBFlags::DSC | ClassBFlags::BAND
    );
}

#[test]
fn test_corrupted_checksum_is_rejected() {
    let decoder = Decoder::new();
    let corrupted = POSITION_REPORT.replace("*4A", "*4B");
    let err = decoder.decode(&corrupted).unwrap_err();
    assert!(matches!(err, DecodeError::ChecksumMismatch { .. }));
    assert_eq!(err.severity(), Severity::Frame);

    // A corrupted first fragment leaves nothing behind
    let corrupted = STATIC_VOYAGE_1.replace("*42", "*4C");
    assert!(decoder.decode(&corrupted).is_err());
    assert_eq!(decoder.reassembler().pending(), 0);
}

#[test]
fn test_corrupted_payload_is_rejected() {
    let decoder = Decoder::new();
    let corrupted = POSITION_REPORT.replace("15RTgt0PA", "15RTgt1PA");
    assert!(matches!(
        decoder.decode(&corrupted),
        Err(DecodeError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_unsupported_message_type() {
    let decoder = Decoder::new();
    let err = decoder
        .decode(&frame("AIVDM,1,1,,A,w000000000000000,0"))
        .unwrap_err();
    assert_eq!(err, DecodeError::Unsupported(63));
    assert!(err.is_unsupported());
    assert_eq!(err.severity(), Severity::Semantic);

    // Type 4 base station report
    let err = decoder
        .decode(&frame("AIVDM,1,1,,A,403OviQuMGCqWrRO9>E6fE700@GO,0"))
        .unwrap_err();
    assert_eq!(err, DecodeError::Unsupported(4));
}

#[test]
fn test_invalid_armor() {
    let decoder = Decoder::new();
    let err = decoder
        .decode(&frame("AIVDM,1,1,,A,15RTgt0PA{o;90TKcjM8h6g208CQ,0"))
        .unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidArmor {
            character: '{',
            position: 9
        }
    );
    assert_eq!(err.severity(), Severity::Armor);
}

#[test]
fn test_truncated_payload_keeps_header() {
    let decoder = Decoder::new();
    let err = decoder
        .decode(&frame("AIVDM,1,1,,A,15RTgt0PAso;90TKcj,0"))
        .unwrap_err();
    let DecodeError::Truncated { header, .. } = err else {
        panic!("expected truncation, got {:?}", err);
    };
    assert_eq!(header.unwrap().mmsi, 371_798_000);
}

#[test]
fn test_own_vessel_report() {
    let decoder = Decoder::new();
    let line = frame("AIVDO,1,1,,,15RTgt0PAso;90TKcjM8h6g208CQ,0");
    let msg = decoder.decode(&line).unwrap().unwrap();
    assert_eq!(msg.mmsi(), 371_798_000);
}

#[test]
fn test_tag_block_prefix() {
    let decoder = Decoder::new();
    let line = format!("\\s:rORBCOMM000,c:1426377000,T:2015-03-15 00.00.00*32\\{}", POSITION_REPORT);
    assert_eq!(decoder.decode(&line).unwrap().unwrap().message_type(), 1);
}

#[test]
fn test_parse_empty_buffer() {
    let mut parser = Parser::default();
    assert!(parser.is_buffer_empty());
    assert_eq!(parser.consume(&[]).count(), 0);
    assert!(parser.is_buffer_empty());
}

#[test]
fn test_parse_byte_by_byte() {
    let mut parser = Parser::default();
    let data = format!("{}\n", CLASS_B);
    let (body, last) = data.as_bytes().split_at(data.len() - 1);
    for b in body {
        assert_eq!(parser.consume(&[*b]).count(), 0);
    }
    let msgs: Vec<_> = parser.consume(last).collect();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].as_ref().unwrap().message_type(), 18);
    assert!(parser.is_buffer_empty());
}

#[test]
fn test_parse_mixed_feed() {
    let feed = [
        POSITION_REPORT,
        "",
        STATIC_VOYAGE_1,
        "this is not NMEA",
        STATIC_VOYAGE_2,
        "$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*76",
        CLASS_B,
    ]
    .join("\r\n")
        + "\r\n";

    let mut parser = Parser::default();
    let mut messages = vec![];
    let mut errors = vec![];
    for chunk in feed.as_bytes().chunks(37) {
        for result in parser.consume(chunk) {
            match result {
                Ok(msg) => messages.push(msg),
                Err(err) => errors.push(err),
            }
        }
    }

    let types: Vec<u8> = messages.iter().map(AisMessage::message_type).collect();
    assert_eq!(types, [1, 5, 18]);
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|err| matches!(err, DecodeError::Malformed { .. })));
    assert!(parser.is_buffer_empty());
}

#[test]
fn test_position_helper() {
    let decoder = Decoder::new();
    let msg = decoder.decode(POSITION_REPORT).unwrap().unwrap();
    let pos = msg.position().unwrap();
    assert!((pos.lat - 48.381_633).abs() < 1e-5);

    decoder.decode(STATIC_VOYAGE_1).unwrap();
    let msg = decoder.decode(STATIC_VOYAGE_2).unwrap().unwrap();
    assert_eq!(msg.position(), None);
}
