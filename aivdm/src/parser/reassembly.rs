use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    hash::{Hash, Hasher},
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use log::{debug, warn};

use super::sentence::RawSentence;
use crate::{
    constants::{DEFAULT_REASSEMBLY_SHARDS, DEFAULT_REASSEMBLY_TTL_SECS},
    payload::BitStream,
    DecodeError,
};

/// Source of "now" for reassembly timeouts
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by [`Instant::now`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Armored payload of a complete message, from one or several sentences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmoredPayload {
    payload: String,
    fill_bits: u8,
}

impl ArmoredPayload {
    pub fn new(payload: impl Into<String>, fill_bits: u8) -> Self {
        Self {
            payload: payload.into(),
            fill_bits,
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn fill_bits(&self) -> u8 {
        self.fill_bits
    }

    pub fn bits(&self) -> Result<BitStream<'_>, DecodeError> {
        BitStream::new(self.payload.as_bytes(), self.fill_bits)
    }
}

impl From<&RawSentence<'_>> for ArmoredPayload {
    fn from(sentence: &RawSentence<'_>) -> Self {
        Self::new(sentence.payload, sentence.fill_bits)
    }
}

/// Fragments belong together when they share channel and sequence id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceKey {
    pub channel: Option<char>,
    pub sequence_id: Option<u8>,
}

impl From<&RawSentence<'_>> for SequenceKey {
    fn from(sentence: &RawSentence<'_>) -> Self {
        Self {
            channel: sentence.channel,
            sequence_id: sentence.sequence_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReassemblerConfig {
    /// How long a multi-sentence message may take to fully arrive,
    /// counted from its first fragment
    pub ttl: Duration,
    /// Number of independently locked partitions of the fragment cache
    pub shards: usize,
}

impl Default for ReassemblerConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_REASSEMBLY_TTL_SECS),
            shards: DEFAULT_REASSEMBLY_SHARDS,
        }
    }
}

struct PendingMessage {
    started: Instant,
    fragments: Vec<Option<String>>,
    fill_bits: u8,
}

impl PendingMessage {
    fn new(started: Instant, fragment_count: u8) -> Self {
        Self {
            started,
            fragments: vec![None; usize::from(fragment_count)],
            fill_bits: 0,
        }
    }

    fn expected(&self) -> u8 {
        self.fragments.len() as u8
    }

    fn received(&self) -> u8 {
        self.fragments.iter().filter(|f| f.is_some()).count() as u8
    }

    fn has(&self, index: u8) -> bool {
        matches!(self.fragments.get(usize::from(index) - 1), Some(Some(_)))
    }

    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.started) > ttl
    }

    fn is_complete(&self) -> bool {
        self.fragments.iter().all(Option::is_some)
    }

    /// Store a fragment, replacing an earlier copy of the same index.
    fn insert(&mut self, sentence: &RawSentence<'_>) {
        let index = usize::from(sentence.fragment_index) - 1;
        if sentence.fragment_index == sentence.fragment_count {
            self.fill_bits = sentence.fill_bits;
        }
        if let Some(slot) = self.fragments.get_mut(index) {
            *slot = Some(sentence.payload.to_owned());
        }
    }

    fn assemble(self) -> ArmoredPayload {
        let payload: String = self.fragments.into_iter().flatten().collect();
        ArmoredPayload::new(payload, self.fill_bits)
    }

    fn incomplete(&self, key: SequenceKey) -> DecodeError {
        DecodeError::IncompleteSequence {
            channel: key.channel,
            sequence_id: key.sequence_id,
            received: self.received(),
            expected: self.expected(),
        }
    }
}

type Shard = HashMap<SequenceKey, PendingMessage>;

/// Collects the fragments of multi-sentence messages.
///
/// The cache is split into shards by [`SequenceKey`] hash, each behind its
/// own lock, so unrelated sequences fed from different threads do not
/// contend. Timeouts are applied lazily when a key is touched again, and
/// for every key by [`Reassembler::sweep`].
pub struct Reassembler<C: Clock = SystemClock> {
    config: ReassemblerConfig,
    clock: C,
    shards: Box<[Mutex<Shard>]>,
}

impl Reassembler<SystemClock> {
    pub fn new(config: ReassemblerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for Reassembler<SystemClock> {
    fn default() -> Self {
        Self::new(ReassemblerConfig::default())
    }
}

impl<C: Clock> Reassembler<C> {
    pub fn with_clock(config: ReassemblerConfig, clock: C) -> Self {
        let shards = (0..config.shards.max(1))
            .map(|_| Mutex::new(HashMap::new()))
            .collect();
        Self {
            config,
            clock,
            shards,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    fn shard(&self, key: &SequenceKey) -> MutexGuard<'_, Shard> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let idx = (hasher.finish() % self.shards.len() as u64) as usize;
        self.shards[idx]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Add one fragment.
    ///
    /// Returns the complete payload once the last missing fragment arrives,
    /// `Ok(None)` while the message is still pending. If the fragment's key
    /// held a sequence older than the TTL, that sequence is dropped and
    /// reported as [`DecodeError::IncompleteSequence`]; the new fragment
    /// is kept as the start of a fresh sequence.
    pub fn push(&self, sentence: &RawSentence<'_>) -> Result<Option<ArmoredPayload>, DecodeError> {
        if sentence.is_single() {
            return Ok(Some(ArmoredPayload::from(sentence)));
        }

        let key = SequenceKey::from(sentence);
        let now = self.clock.now();
        let mut shard = self.shard(&key);

        let mut expired = None;
        if let Some(pending) = shard.get(&key) {
            if pending.is_expired(now, self.config.ttl) {
                expired = Some(pending.incomplete(key));
                shard.remove(&key);
            } else if pending.expected() != sentence.fragment_count {
                debug!(
                    "Fragment count changed from {} to {} for {:?}, dropping {} fragment(s)",
                    pending.expected(),
                    sentence.fragment_count,
                    key,
                    pending.received()
                );
                shard.remove(&key);
            } else if sentence.fragment_index == 1 && pending.has(1) {
                debug!(
                    "New sequence started for {:?}, dropping {} fragment(s)",
                    key,
                    pending.received()
                );
                shard.remove(&key);
            }
        }

        let pending = shard
            .entry(key)
            .or_insert_with(|| PendingMessage::new(now, sentence.fragment_count));
        pending.insert(sentence);

        let complete = if pending.is_complete() {
            shard.remove(&key).map(PendingMessage::assemble)
        } else {
            None
        };
        drop(shard);

        match expired {
            Some(err) => {
                warn!("{}", err);
                Err(err)
            },
            None => Ok(complete),
        }
    }

    /// Evict every sequence older than the TTL.
    pub fn sweep(&self) -> Vec<DecodeError> {
        let now = self.clock.now();
        let ttl = self.config.ttl;
        let mut evicted = Vec::new();
        for shard in self.shards.iter() {
            let mut shard = shard.lock().unwrap_or_else(PoisonError::into_inner);
            shard.retain(|key, pending| {
                if pending.is_expired(now, ttl) {
                    let err = pending.incomplete(*key);
                    warn!("{}", err);
                    evicted.push(err);
                    false
                } else {
                    true
                }
            });
        }
        evicted
    }

    /// Number of sequences waiting for more fragments
    pub fn pending(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.lock().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }
}
