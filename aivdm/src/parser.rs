mod checksum;
mod reassembly;
mod sentence;

use std::time::Duration;

use log::{debug, warn};

pub use reassembly::{
    ArmoredPayload, Clock, Reassembler, ReassemblerConfig, SequenceKey, SystemClock,
};
pub use sentence::RawSentence;

use crate::{
    constants::{MAX_LINE_LEN, NMEA_END_CHAR_1, NMEA_END_CHAR_2},
    error::Severity,
    messages::{match_message, AisMessage},
    payload::BitStream,
    DecodeError,
};

/// Decode a complete armored payload.
pub fn decode_payload(payload: &ArmoredPayload) -> Result<AisMessage, DecodeError> {
    match_message(&payload.bits()?)
}

fn log_rejected(err: &DecodeError) {
    match err.severity() {
        Severity::Frame | Severity::Armor => warn!("Dropping sentence: {}", err),
        Severity::Semantic => debug!("{}", err),
    }
}

/// Sentence-at-a-time decoder.
///
/// Holds the reassembly state for multi-sentence messages; everything else
/// is stateless, so one `Decoder` can be shared between threads.
pub struct Decoder<C: Clock = SystemClock> {
    reassembler: Reassembler<C>,
}

impl Default for Decoder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder<SystemClock> {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> DecoderBuilder<SystemClock> {
        DecoderBuilder::default()
    }
}

impl<C: Clock> Decoder<C> {
    /// Decode one NMEA line.
    ///
    /// `Ok(None)` means the line was a fragment of a message that is not
    /// complete yet.
    pub fn decode(&self, line: &str) -> Result<Option<AisMessage>, DecodeError> {
        let sentence = RawSentence::parse(line).inspect_err(log_rejected)?;
        self.decode_sentence(&sentence)
    }

    /// Decode an already framed sentence.
    pub fn decode_sentence(
        &self,
        sentence: &RawSentence<'_>,
    ) -> Result<Option<AisMessage>, DecodeError> {
        let result = if sentence.is_single() {
            BitStream::new(sentence.payload.as_bytes(), sentence.fill_bits)
                .and_then(|bits| match_message(&bits))
        } else {
            match self.reassembler.push(sentence) {
                Ok(Some(payload)) => decode_payload(&payload),
                Ok(None) => {
                    debug!(
                        "Fragment {}/{} of sequence {:?} on channel {:?} pending",
                        sentence.fragment_index,
                        sentence.fragment_count,
                        sentence.sequence_id,
                        sentence.channel
                    );
                    return Ok(None);
                },
                // already logged by the reassembler
                Err(err) => return Err(err),
            }
        };
        result.map(Some).inspect_err(log_rejected)
    }

    /// Evict and report multi-sentence messages that timed out.
    pub fn sweep(&self) -> Vec<DecodeError> {
        self.reassembler.sweep()
    }

    pub fn reassembler(&self) -> &Reassembler<C> {
        &self.reassembler
    }
}

/// Configures a [`Decoder`]
pub struct DecoderBuilder<C: Clock = SystemClock> {
    config: ReassemblerConfig,
    clock: C,
}

impl Default for DecoderBuilder<SystemClock> {
    fn default() -> Self {
        Self {
            config: ReassemblerConfig::default(),
            clock: SystemClock,
        }
    }
}

impl<C: Clock> DecoderBuilder<C> {
    /// Time a multi-sentence message has to fully arrive
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.config.ttl = ttl;
        self
    }

    pub fn with_shards(mut self, shards: usize) -> Self {
        self.config.shards = shards;
        self
    }

    pub fn with_config(mut self, config: ReassemblerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the time source, mostly useful in tests
    pub fn with_clock<D: Clock>(self, clock: D) -> DecoderBuilder<D> {
        DecoderBuilder {
            config: self.config,
            clock,
        }
    }

    pub fn build(self) -> Decoder<C> {
        Decoder {
            reassembler: Reassembler::with_clock(self.config, self.clock),
        }
    }
}

/// Streaming parser for raw NMEA input.
///
/// Bytes go in through [`Parser::consume`], which may be called with
/// arbitrary chunks (a line may be split across calls). Incomplete lines are
/// kept in an internal buffer until their terminator arrives.
pub struct Parser<C: Clock = SystemClock> {
    buf: Vec<u8>,
    decoder: Decoder<C>,
    // Inside a line that overflowed MAX_LINE_LEN, dropping until its end
    discarding: bool,
}

impl Default for Parser<SystemClock> {
    fn default() -> Self {
        Self::new(Decoder::new())
    }
}

impl<C: Clock> Parser<C> {
    pub fn new(decoder: Decoder<C>) -> Self {
        Self {
            buf: Vec::new(),
            decoder,
            discarding: false,
        }
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn buffer_len(&self) -> usize {
        self.buf.len()
    }

    pub fn decoder(&self) -> &Decoder<C> {
        &self.decoder
    }

    pub fn consume<'a>(&'a mut self, new_data: &[u8]) -> ParserIter<'a, C> {
        self.buf.extend_from_slice(new_data);
        ParserIter {
            buf: &mut self.buf,
            decoder: &self.decoder,
            discarding: &mut self.discarding,
            pos: 0,
        }
    }
}

/// Iterator over the messages completed by the data given to [`Parser::consume`]
///
/// Consumed bytes are released from the parser buffer when the iterator is dropped.
pub struct ParserIter<'a, C: Clock> {
    buf: &'a mut Vec<u8>,
    decoder: &'a Decoder<C>,
    discarding: &'a mut bool,
    pos: usize,
}

fn is_line_end(byte: &u8) -> bool {
    *byte == NMEA_END_CHAR_1 || *byte == NMEA_END_CHAR_2
}

impl<C: Clock> Iterator for ParserIter<'_, C> {
    type Item = Result<AisMessage, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = &self.buf[self.pos..];
            let Some(end) = rest.iter().position(is_line_end) else {
                if rest.len() > MAX_LINE_LEN && !*self.discarding {
                    *self.discarding = true;
                    let err = DecodeError::malformed("line too long", &String::from_utf8_lossy(rest));
                    self.pos = self.buf.len();
                    log_rejected(&err);
                    return Some(Err(err));
                }
                if *self.discarding {
                    self.pos = self.buf.len();
                }
                return None;
            };
            let start = self.pos;
            self.pos += end + 1;

            if std::mem::take(&mut *self.discarding) {
                continue;
            }
            let line = &self.buf[start..start + end];
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            if line.len() > MAX_LINE_LEN {
                let err = DecodeError::malformed("line too long", &String::from_utf8_lossy(line));
                log_rejected(&err);
                return Some(Err(err));
            }
            let Ok(line) = std::str::from_utf8(line) else {
                let err = DecodeError::malformed("not valid UTF-8", &String::from_utf8_lossy(line));
                log_rejected(&err);
                return Some(Err(err));
            };
            match self.decoder.decode(line) {
                Ok(Some(msg)) => return Some(Ok(msg)),
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<C: Clock> Drop for ParserIter<'_, C> {
    fn drop(&mut self) {
        self.buf.drain(..self.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPE_1: &str = "!AIVDM,1,1,,A,15RTgt0PAso;90TKcjM8h6g208CQ,0*4A\r\n";
    const TYPE_5_1: &str = "!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C\r\n";
    const TYPE_5_2: &str = "!AIVDM,2,2,1,A,88888888880,2*25\r\n";

    #[test]
    fn decoder_single_sentence() {
        let decoder = Decoder::new();
        let msg = decoder.decode(TYPE_1).unwrap().unwrap();
        assert_eq!(msg.message_type(), 1);
        assert_eq!(msg.mmsi(), 371_798_000);
    }

    #[test]
    fn decoder_two_sentences() {
        let decoder = Decoder::new();
        assert_eq!(decoder.decode(TYPE_5_1).unwrap(), None);
        assert_eq!(decoder.reassembler().pending(), 1);
        let msg = decoder.decode(TYPE_5_2).unwrap().unwrap();
        assert!(matches!(msg, AisMessage::StaticVoyageData(ref m) if m.vessel_name == "EVER DIADEM"));
        assert_eq!(decoder.reassembler().pending(), 0);
    }

    #[test]
    fn builder_settings() {
        let decoder = Decoder::builder()
            .with_ttl(Duration::from_secs(30))
            .with_shards(4)
            .build();
        assert_eq!(decoder.reassembler().ttl(), Duration::from_secs(30));
    }

    #[test]
    fn parser_handles_split_input() {
        let mut parser = Parser::default();
        let (a, b) = TYPE_1.as_bytes().split_at(20);
        assert_eq!(parser.consume(a).count(), 0);
        assert_eq!(parser.buffer_len(), 20);
        let msgs: Vec<_> = parser.consume(b).collect();
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].is_ok());
        assert!(parser.is_buffer_empty());
    }

    #[test]
    fn parser_multiple_lines_and_blank_lines() {
        let mut parser = Parser::default();
        let input = format!("{}\n\n{}{}{}", TYPE_1, TYPE_5_1, TYPE_5_2, TYPE_1);
        let msgs: Vec<_> = parser
            .consume(input.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();
        let types: Vec<u8> = msgs.iter().map(AisMessage::message_type).collect();
        assert_eq!(types, [1, 5, 1]);
    }

    #[test]
    fn parser_reports_errors_and_continues() {
        let mut parser = Parser::default();
        let input = format!("garbage\n{}", TYPE_1);
        let mut it = parser.consume(input.as_bytes());
        assert!(matches!(it.next(), Some(Err(DecodeError::Malformed { .. }))));
        assert!(matches!(it.next(), Some(Ok(_))));
        assert!(it.next().is_none());
    }

    #[test]
    fn parser_drops_overlong_line() {
        let mut parser = Parser::default();
        let junk = vec![b'x'; MAX_LINE_LEN + 1];
        let mut it = parser.consume(&junk);
        assert!(matches!(
            it.next(),
            Some(Err(DecodeError::Malformed {
                reason: "line too long",
                ..
            }))
        ));
        assert!(it.next().is_none());
        drop(it);
        assert!(parser.is_buffer_empty());

        // Rest of the long line, then a good one
        let input = format!("xxxx\n{}", TYPE_1);
        let msgs: Vec<_> = parser.consume(input.as_bytes()).collect();
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].is_ok());
    }

    #[test]
    fn parser_rejects_non_utf8() {
        let mut parser = Parser::default();
        let mut it = parser.consume(b"!AIVDM\xff\n");
        assert!(matches!(
            it.next(),
            Some(Err(DecodeError::Malformed {
                reason: "not valid UTF-8",
                ..
            }))
        ));
    }
}
