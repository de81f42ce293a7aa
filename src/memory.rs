use std::ops::Range;

use crate::constants::FREE_PAGE;

pub type ProcessId = u32;

/// One successful placement. Never modified after the simulator records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub pid: ProcessId,
    pub start_address: u32,
    /// Requested size in MB
    pub process_size: u32,
    pub pages_allocated: usize,
    /// Internal fragmentation: allocated capacity minus requested size
    pub unused_space: u32,
    /// Index of the first page-table slot owned by this process
    pub start_page: usize,
}

impl Allocation {
    /// Page-table slots covered by this allocation
    pub fn pages(&self) -> Range<usize> {
        self.start_page..self.start_page + self.pages_allocated
    }
}

/// A contiguous run of slots owned by a single process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRun {
    pub pid: ProcessId,
    pub start: usize,
    pub len: usize,
}

/// Fixed-length map from page index to owning process
pub struct PageTable {
    slots: Vec<Option<ProcessId>>,
}

impl PageTable {
    /// Create a table with every page free
    pub fn new(len: usize) -> Self {
        PageTable {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Owner of a page, `None` if the page is free
    #[inline]
    pub fn owner(&self, index: usize) -> Option<ProcessId> {
        self.slots[index]
    }

    /// Owner as printed in the page-table dump (free pages print as 0)
    #[inline]
    pub fn raw_owner(&self, index: usize) -> u32 {
        self.slots[index].unwrap_or(FREE_PAGE)
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Mark every page in `pages` as owned by `pid`.
    ///
    /// # Panics
    /// Panics if the range is out of bounds or touches an owned page. Pages are
    /// never freed, so either case is a bug in the caller.
    pub fn assign(&mut self, pages: Range<usize>, pid: ProcessId) {
        for slot in &mut self.slots[pages] {
            assert!(slot.is_none(), "page already owned by process {slot:?}");
            *slot = Some(pid);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<ProcessId>> + '_ {
        self.slots.iter().copied()
    }

    /// Contiguous owned runs in index order. Free pages end a run and are skipped.
    pub fn runs(&self) -> Vec<PageRun> {
        let mut runs: Vec<PageRun> = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(pid) = *slot else { continue };
            match runs.last_mut() {
                Some(run) if run.pid == pid && run.start + run.len == index => run.len += 1,
                _ => runs.push(PageRun {
                    pid,
                    start: index,
                    len: 1,
                }),
            }
        }
        runs
    }
}
