//! Play queue with a linear cursor and an optional shuffle projection
//!
//! The queue is replaced wholesale whenever the listening context changes
//! (search results, album, playlist). Navigation is pure index arithmetic:
//! [`Queue::advance`] computes where to go, [`Queue::move_to`] commits it.

use crate::shuffle::ShuffleProjection;
use crate::types::RepeatMode;
use musica_core::{Track, TrackId};
use rand::Rng;

/// Direction of travel through the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end
    Forward,
    /// Towards the start
    Backward,
}

/// A resolved queue position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Index into the underlying (unshuffled) track list
    pub index: usize,

    /// Position within the shuffle projection, when shuffle is active
    pub shuffle_position: Option<usize>,
}

/// Result of [`Queue::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Play the track at this position
    To(Position),

    /// End of queue under `repeat = off`, or the queue is empty
    Exhausted,
}

/// Ordered tracks plus a cursor
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,

    /// Index of the selected track; meaningful only when `tracks` is non-empty
    cursor: usize,

    /// Present exactly while shuffle is on
    shuffle: Option<ShuffleProjection>,
}

impl Queue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue and select `start` (clamped)
    ///
    /// When shuffle is on the projection is regenerated with `start` first.
    pub fn set_tracks<R: Rng + ?Sized>(&mut self, tracks: Vec<Track>, start: usize, rng: &mut R) {
        self.tracks = tracks;
        self.cursor = self.clamp(start);
        if self.shuffle.is_some() {
            self.shuffle = Some(ShuffleProjection::generate(self.tracks.len(), self.cursor, rng));
        }
    }

    /// Select a queue index directly (clamped), reshuffling around it when shuffle is on
    pub fn select<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        self.cursor = self.clamp(index);
        if self.shuffle.is_some() {
            self.shuffle = Some(ShuffleProjection::generate(self.tracks.len(), self.cursor, rng));
        }
    }

    /// Turn shuffle on, anchored at the current cursor
    pub fn enable_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.shuffle = Some(ShuffleProjection::generate(self.tracks.len(), self.cursor, rng));
    }

    /// Turn shuffle off and resynchronize the cursor to `current`
    ///
    /// Falls back to index 0 when `current` is `None` or no longer queued.
    pub fn disable_shuffle(&mut self, current: Option<TrackId>) {
        self.shuffle = None;
        self.cursor = current.and_then(|id| self.position_of(id)).unwrap_or(0);
    }

    /// Compute the next position under the shuffle and repeat policy
    ///
    /// Going forward past the end wraps only for [`RepeatMode::All`]
    /// (`One` is handled by the caller on `ended`, so an explicit skip
    /// behaves like `Off`). Going backward past the start always wraps.
    pub fn advance(&self, direction: Direction, repeat: RepeatMode) -> Advance {
        let len = self.tracks.len();
        if len == 0 {
            return Advance::Exhausted;
        }

        // Cursor in whichever sequence is being walked
        let at = self.shuffle.as_ref().map_or(self.cursor, ShuffleProjection::cursor);

        let target = match direction {
            Direction::Forward if at + 1 < len => at + 1,
            Direction::Forward if repeat == RepeatMode::All => 0,
            Direction::Forward => return Advance::Exhausted,
            Direction::Backward if at > 0 => at - 1,
            Direction::Backward => len - 1,
        };

        match &self.shuffle {
            Some(projection) => match projection.index_at(target) {
                Some(index) => Advance::To(Position {
                    index,
                    shuffle_position: Some(target),
                }),
                None => Advance::Exhausted,
            },
            None => Advance::To(Position {
                index: target,
                shuffle_position: None,
            }),
        }
    }

    /// Commit a position returned by [`Queue::advance`]
    pub fn move_to(&mut self, position: Position) {
        self.cursor = self.clamp(position.index);
        if let (Some(projection), Some(shuffle_position)) =
            (self.shuffle.as_mut(), position.shuffle_position)
        {
            projection.set_cursor(shuffle_position);
        }
    }

    /// Track at a resolved position
    pub fn track_at(&self, position: Position) -> Option<&Track> {
        self.tracks.get(position.index)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// All tracks in original order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Track at a queue index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Selected queue index, `None` when empty
    pub fn cursor(&self) -> Option<usize> {
        (!self.tracks.is_empty()).then_some(self.cursor)
    }

    /// Selected track
    pub fn current(&self) -> Option<&Track> {
        self.cursor().and_then(|i| self.tracks.get(i))
    }

    /// Whether shuffle is on
    pub fn is_shuffled(&self) -> bool {
        self.shuffle.is_some()
    }

    /// Shuffle permutation, when shuffle is on
    pub fn shuffle_order(&self) -> Option<&[usize]> {
        self.shuffle.as_ref().map(ShuffleProjection::order)
    }

    /// Position within the shuffle permutation, when shuffle is on
    pub fn shuffle_cursor(&self) -> Option<usize> {
        self.shuffle.as_ref().map(ShuffleProjection::cursor)
    }

    /// Queue index of the first track with `id`
    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.tracks.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // ===== Test Helpers =====

    fn create_track(id: i64) -> Track {
        Track::new(TrackId::new(id), format!("Track {id}"), "Artist")
            .with_preview(format!("https://audio.example.com/{id}.m4a"))
    }

    fn queue_of(len: i64, start: usize) -> Queue {
        let mut rng = StdRng::seed_from_u64(0);
        let mut queue = Queue::new();
        queue.set_tracks((0..len).map(create_track).collect(), start, &mut rng);
        queue
    }

    fn linear(index: usize) -> Advance {
        Advance::To(Position {
            index,
            shuffle_position: None,
        })
    }

    // ===== Linear Navigation =====

    #[test]
    fn empty_queue_has_no_cursor() {
        let queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.cursor(), None);
        assert!(queue.current().is_none());
        assert_eq!(queue.advance(Direction::Forward, RepeatMode::All), Advance::Exhausted);
        assert_eq!(queue.advance(Direction::Backward, RepeatMode::Off), Advance::Exhausted);
    }

    #[test]
    fn start_index_is_clamped() {
        let queue = queue_of(3, 10);
        assert_eq!(queue.cursor(), Some(2));
    }

    #[test]
    fn forward_stops_at_end_without_repeat() {
        let queue = queue_of(3, 2);
        assert_eq!(queue.advance(Direction::Forward, RepeatMode::Off), Advance::Exhausted);
        assert_eq!(queue.advance(Direction::Forward, RepeatMode::One), Advance::Exhausted);
    }

    #[test]
    fn forward_wraps_with_repeat_all() {
        let queue = queue_of(3, 2);
        assert_eq!(queue.advance(Direction::Forward, RepeatMode::All), linear(0));
    }

    #[test]
    fn backward_always_wraps() {
        let queue = queue_of(3, 0);
        assert_eq!(queue.advance(Direction::Backward, RepeatMode::Off), linear(2));
    }

    #[test]
    fn advance_does_not_move_cursor() {
        let queue = queue_of(3, 1);
        let _ = queue.advance(Direction::Forward, RepeatMode::Off);
        assert_eq!(queue.cursor(), Some(1));
    }

    #[test]
    fn move_to_commits_position() {
        let mut queue = queue_of(3, 0);
        if let Advance::To(pos) = queue.advance(Direction::Forward, RepeatMode::Off) {
            queue.move_to(pos);
        }
        assert_eq!(queue.cursor(), Some(1));
        assert_eq!(queue.current().map(|t| t.id), Some(TrackId::new(1)));
    }

    // ===== Shuffle =====

    #[test]
    fn enable_shuffle_anchors_current() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut queue = queue_of(5, 3);
        queue.enable_shuffle(&mut rng);
        assert!(queue.is_shuffled());
        assert_eq!(queue.shuffle_order().map(|o| o[0]), Some(3));
        assert_eq!(queue.shuffle_cursor(), Some(0));
    }

    #[test]
    fn shuffled_advance_follows_projection() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut queue = queue_of(4, 0);
        queue.enable_shuffle(&mut rng);
        let order = queue.shuffle_order().map(<[usize]>::to_vec).unwrap_or_default();

        for (step, &expected) in order.iter().enumerate().skip(1) {
            let Advance::To(pos) = queue.advance(Direction::Forward, RepeatMode::Off) else {
                panic!("queue exhausted early at step {step}");
            };
            assert_eq!(pos.index, expected);
            queue.move_to(pos);
        }
        assert_eq!(queue.advance(Direction::Forward, RepeatMode::Off), Advance::Exhausted);
    }

    #[test]
    fn disable_shuffle_resyncs_to_playing_track() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut queue = queue_of(5, 0);
        queue.enable_shuffle(&mut rng);
        if let Advance::To(pos) = queue.advance(Direction::Forward, RepeatMode::Off) {
            queue.move_to(pos);
        }
        let playing = queue.current().map(|t| t.id);
        queue.disable_shuffle(playing);
        assert!(!queue.is_shuffled());
        assert_eq!(queue.current().map(|t| t.id), playing);
    }

    #[test]
    fn disable_shuffle_falls_back_to_zero() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut queue = queue_of(3, 2);
        queue.enable_shuffle(&mut rng);
        queue.disable_shuffle(Some(TrackId::new(99)));
        assert_eq!(queue.cursor(), Some(0));
    }

    #[test]
    fn replacing_tracks_while_shuffled_regenerates() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut queue = queue_of(3, 0);
        queue.enable_shuffle(&mut rng);
        queue.set_tracks((10..16).map(create_track).collect(), 4, &mut rng);
        let order = queue.shuffle_order().map(<[usize]>::to_vec).unwrap_or_default();
        assert_eq!(order.len(), 6);
        assert_eq!(order[0], 4);
    }
}
