/*!
The packed index of every JSON value in a document's byte buffer.

A description is a flat, contiguous log of fixed-width entries written in parse order:
the root first, then each child depth-first in source order. Within an object, a
member contributes exactly two consecutive entries (key, then value). Every container
entry carries an `indexLength` — the number of entries its subtree occupies, itself
included — so a whole subtree can be skipped or sliced out without visiting its
descendants one at a time.

Entries are stored packed rather than as a `Vec` of a tagged Rust enum: mutation
splices whole byte ranges (removing a member, adopting a nested container's entries),
and a flat byte store is what makes that a single `Vec::splice` instead of an
index-by-index shuffle.
*/

use crate::buffer::ByteBuffer;

/// Size in bytes of one packed entry: 1 byte type tag + 4×u32 fields, little-endian.
pub(crate) const ENTRY_SIZE: usize = 17;

const OFF_TYPE: usize = 0;
const OFF_JSON_OFFSET: usize = 1;
const OFF_JSON_LENGTH: usize = 5;
const OFF_INDEX_LENGTH: usize = 9;
const OFF_MEMBER_COUNT: usize = 13;

/// The kind of JSON value a description entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EntryType {
    Object = 0,
    Array = 1,
    String = 2,
    StringWithEscaping = 3,
    Integer = 4,
    FloatingNumber = 5,
    BoolTrue = 6,
    BoolFalse = 7,
    Null = 8,
}

impl EntryType {
    fn from_tag(tag: u8) -> Self {
        match tag {
            0 => EntryType::Object,
            1 => EntryType::Array,
            2 => EntryType::String,
            3 => EntryType::StringWithEscaping,
            4 => EntryType::Integer,
            5 => EntryType::FloatingNumber,
            6 => EntryType::BoolTrue,
            7 => EntryType::BoolFalse,
            8 => EntryType::Null,
            _ => internal_error!("entry type tag {} is out of range", tag),
        }
    }

    #[inline]
    pub(crate) fn is_container(self) -> bool {
        matches!(self, EntryType::Object | EntryType::Array)
    }

    #[inline]
    pub(crate) fn is_string(self) -> bool {
        matches!(self, EntryType::String | EntryType::StringWithEscaping)
    }
}

/// A packed, fixed-width index over a JSON byte buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Description {
    storage: ByteBuffer,
}

impl Description {
    pub(crate) fn new() -> Self {
        Description {
            storage: ByteBuffer::new(),
        }
    }

    #[inline]
    pub(crate) fn entry_count(&self) -> usize {
        self.storage.len() / ENTRY_SIZE
    }

    #[inline]
    fn record_offset(entry_index: usize) -> usize {
        entry_index * ENTRY_SIZE
    }

    #[inline]
    pub(crate) fn type_at(&self, entry_index: usize) -> EntryType {
        EntryType::from_tag(self.storage.read_u8(Self::record_offset(entry_index) + OFF_TYPE))
    }

    #[inline]
    pub(crate) fn json_offset_at(&self, entry_index: usize) -> u32 {
        self.storage
            .read_u32(Self::record_offset(entry_index) + OFF_JSON_OFFSET)
    }

    #[inline]
    pub(crate) fn json_length_at(&self, entry_index: usize) -> u32 {
        self.storage
            .read_u32(Self::record_offset(entry_index) + OFF_JSON_LENGTH)
    }

    #[inline]
    pub(crate) fn index_length_at(&self, entry_index: usize) -> u32 {
        self.storage
            .read_u32(Self::record_offset(entry_index) + OFF_INDEX_LENGTH)
    }

    #[inline]
    pub(crate) fn member_count_at(&self, entry_index: usize) -> u32 {
        self.storage
            .read_u32(Self::record_offset(entry_index) + OFF_MEMBER_COUNT)
    }

    #[inline]
    pub(crate) fn json_bounds_at(&self, entry_index: usize) -> (usize, usize) {
        (
            self.json_offset_at(entry_index) as usize,
            self.json_length_at(entry_index) as usize,
        )
    }

    /// Advance `entry_index` past its own entry and every descendant's.
    #[inline]
    pub(crate) fn skip_index(&self, entry_index: usize) -> usize {
        entry_index + self.index_length_at(entry_index) as usize
    }

    fn set_json_offset_at(&mut self, entry_index: usize, value: u32) {
        self.storage
            .write_u32(Self::record_offset(entry_index) + OFF_JSON_OFFSET, value);
    }

    fn set_json_length_at(&mut self, entry_index: usize, value: u32) {
        self.storage
            .write_u32(Self::record_offset(entry_index) + OFF_JSON_LENGTH, value);
    }

    fn set_index_length_at(&mut self, entry_index: usize, value: u32) {
        self.storage
            .write_u32(Self::record_offset(entry_index) + OFF_INDEX_LENGTH, value);
    }

    fn set_member_count_at(&mut self, entry_index: usize, value: u32) {
        self.storage
            .write_u32(Self::record_offset(entry_index) + OFF_MEMBER_COUNT, value);
    }

    fn push_record(&mut self, entry_type: EntryType, json_offset: u32, json_length: u32, index_length: u32, member_count: u32) -> usize {
        let index = self.entry_count();
        self.storage.push_bytes(&[entry_type as u8]);
        self.storage.push_bytes(&json_offset.to_le_bytes());
        self.storage.push_bytes(&json_length.to_le_bytes());
        self.storage.push_bytes(&index_length.to_le_bytes());
        self.storage.push_bytes(&member_count.to_le_bytes());
        index
    }

    /// Append a complete leaf entry (string/number/bool/null) and return its entry index.
    pub(crate) fn push_leaf_entry(&mut self, entry_type: EntryType, json_offset: usize, json_length: usize) -> usize {
        test_assert!(!entry_type.is_container());
        self.push_record(entry_type, json_offset as u32, json_length as u32, 1, 0)
    }

    /// Reserve a container entry (object/array) whose bounds aren't known yet; its
    /// descendants are pushed next, then [`Description::complete_container`] backpatches it.
    pub(crate) fn reserve_container(&mut self, entry_type: EntryType, json_offset: usize) -> usize {
        test_assert!(entry_type.is_container());
        self.push_record(entry_type, json_offset as u32, 0, 1, 0)
    }

    /// Backpatch a container reserved with [`Description::reserve_container`] once its
    /// closing bracket and all descendant entries have been appended.
    pub(crate) fn complete_container(&mut self, entry_index: usize, json_end: usize, member_count: u32) {
        let json_offset = self.json_offset_at(entry_index) as usize;
        let json_length = json_end - json_offset;
        let index_length = self.entry_count() - entry_index;

        self.set_json_length_at(entry_index, json_length as u32);
        self.set_index_length_at(entry_index, index_length as u32);
        self.set_member_count_at(entry_index, member_count);
    }

    /// Copy `count` consecutive entries starting at `from` into a standalone description,
    /// rebasing their `jsonOffset`s so the slice's root starts at byte `0`.
    pub(crate) fn slice_rebased(&self, from: usize, count: usize) -> Description {
        let start = Self::record_offset(from);
        let end = Self::record_offset(from + count);
        let mut sliced = Description {
            storage: ByteBuffer::from_vec(self.storage.as_slice()[start..end].to_vec()),
        };

        let base = sliced.json_offset_at(0);
        sliced.advance_all_json_offsets(-(base as i64));
        sliced
    }

    /// Shift every entry's `jsonOffset` by `delta`, used to rebase a sliced-out subtree to
    /// `0`, or to adopt one into a buffer at a new absolute offset.
    pub(crate) fn advance_all_json_offsets(&mut self, delta: i64) {
        for i in 0..self.entry_count() {
            let jo = self.json_offset_at(i) as i64 + delta;
            self.set_json_offset_at(i, jo as u32);
        }
    }

    /// The raw packed bytes for this description's entries, for splicing into another
    /// description wholesale (callers rebase offsets first via
    /// [`Description::advance_all_json_offsets`]).
    pub(crate) fn as_raw_entries(&self) -> &[u8] {
        self.storage.as_slice()
    }

    /// Append another description's raw, already-rebased entries onto the end of this
    /// one — used to assemble a multi-entry fragment (e.g. a key entry followed by its
    /// value's entries) before splicing it into a document wholesale.
    pub(crate) fn append_raw_entries(&mut self, raw: &[u8]) {
        test_assert_eq!(raw.len() % ENTRY_SIZE, 0);
        self.storage.push_bytes(raw);
    }

    /**
    Replace `old_entry_count` entries starting at `entry_index` with the raw packed
    entries in `new_entries`, propagating the resulting entry-count and byte-length
    deltas up to the root (entry `0`) and shifting every later entry's `jsonOffset` by
    `byte_delta`.

    `member_count_delta` adjusts the root's `memberCount` (used by insert/remove; `0` for
    a plain value replacement). Every mutation on a document's own top-level members goes
    through this one routine, since nested values are only ever reachable as independent
    copies (see `document.rs`) — the root is always the sole ancestor that needs patching.
    */
    pub(crate) fn apply_splice(
        &mut self,
        entry_index: usize,
        old_entry_count: usize,
        new_entries: &[u8],
        byte_delta: isize,
        member_count_delta: i64,
    ) {
        test_assert!(entry_index != 0, "the root itself is never spliced in place");
        test_assert_eq!(new_entries.len() % ENTRY_SIZE, 0);

        let new_entry_count = new_entries.len() / ENTRY_SIZE;
        let entry_delta = new_entry_count as isize - old_entry_count as isize;

        let byte_range = Self::record_offset(entry_index)..Self::record_offset(entry_index + old_entry_count);
        self.storage.splice_range(byte_range, new_entries);

        let root_index_length = self.index_length_at(0) as isize + entry_delta;
        self.set_index_length_at(0, root_index_length as u32);

        let root_json_length = self.json_length_at(0) as isize + byte_delta;
        self.set_json_length_at(0, root_json_length as u32);

        if member_count_delta != 0 {
            let member_count = self.member_count_at(0) as i64 + member_count_delta;
            self.set_member_count_at(0, member_count as u32);
        }

        let after_start = entry_index + new_entry_count;
        for i in after_start..self.entry_count() {
            let jo = self.json_offset_at(i) as isize + byte_delta;
            self.set_json_offset_at(i, jo as u32);
        }
    }
}
