use std::{
    any::Any,
    cell::Cell,
    cmp::Ordering,
    fmt::{self, Debug},
    panic::{catch_unwind, AssertUnwindSafe},
    rc::Rc,
    thread,
};

#[derive(Debug, Clone)]
pub struct FileSpan {
    pub file: &'static str,
    pub line: u32,
}

pub type ThreadError = Box<dyn Any + Send + 'static>;

#[derive(Debug, Clone)]
pub struct ShouldHavePanickedAt {
    pub span: FileSpan,
}

macro_rules! file_span {
    () => {{
        use crate::test_utils::FileSpan;
        FileSpan {
            file: file!(),
            line: line!(),
        }
    }};
}

pub fn must_panic<F, R>(span: FileSpan, f: F) -> Result<ThreadError, ShouldHavePanickedAt>
where
    F: FnOnce() -> R,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => Err(ShouldHavePanickedAt { span }),
        Err(e) => Ok(e),
    }
}

#[test]
fn test_must_panic() {
    assert!(must_panic(file_span!(), || panic!()).is_ok());
    assert!(must_panic(file_span!(), || ()).is_err());
}

/// Gets the message of a panic raised with a formatted string.
pub fn panic_message(e: &ThreadError) -> &str {
    if let Some(s) = e.downcast_ref::<String>() {
        s
    } else if let Some(s) = e.downcast_ref::<&'static str>() {
        s
    } else {
        ""
    }
}

//////////////////////////////////////////////////////////////////

/// Whether a type implements a trait, evaluated for a concrete type.
///
/// The inherent `IMPLS` constant shadows the one from `DoesNotImpl`
/// only when the bound on the inherent impl holds.
macro_rules! impls {
    ($ty:ty: $($bounds:tt)+) => {{
        #[allow(dead_code)]
        struct GetImpls<T: ?Sized>(std::marker::PhantomData<T>);

        #[allow(dead_code)]
        trait DoesNotImpl {
            const IMPLS: bool = false;
        }
        impl<T: ?Sized> DoesNotImpl for GetImpls<T> {}

        #[allow(dead_code)]
        impl<T: ?Sized + $($bounds)+> GetImpls<T> {
            const IMPLS: bool = true;
        }

        <GetImpls<$ty>>::IMPLS
    }};
}

#[test]
fn test_impls() {
    assert!(impls!(u32: Copy));
    assert!(!impls!(String: Copy));
    assert!(impls!(String: Clone + Ord));
}

//////////////////////////////////////////////////////////////////

thread_local! {
    static COUNTERS: Counters = Counters::default();
}

#[derive(Default)]
struct Counters {
    live: Cell<usize>,
    constructed: Cell<usize>,
    dropped: Cell<usize>,
    clone_froms: Cell<usize>,
}

/// A snapshot of the instance counters of [`Tracked`] in the current thread.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Counts {
    pub live: usize,
    pub constructed: usize,
    pub dropped: usize,
    pub clone_froms: usize,
}

fn counts() -> Counts {
    COUNTERS.with(|c| Counts {
        live: c.live.get(),
        constructed: c.constructed.get(),
        dropped: c.dropped.get(),
        clone_froms: c.clone_froms.get(),
    })
}

/// A value which keeps track of how many instances of it were
/// constructed, dropped, and assigned with `clone_from` in the current thread.
pub struct Tracked {
    value: i32,
}

impl Tracked {
    pub fn new(value: i32) -> Self {
        COUNTERS.with(|c| {
            c.live.set(c.live.get() + 1);
            c.constructed.set(c.constructed.get() + 1);
        });
        Self { value }
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Default for Tracked {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(self.value)
    }

    fn clone_from(&mut self, source: &Self) {
        COUNTERS.with(|c| c.clone_froms.set(c.clone_froms.get() + 1));
        self.value = source.value;
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        COUNTERS.with(|c| {
            c.live.set(c.live.get() - 1);
            c.dropped.set(c.dropped.get() + 1);
        });
    }
}

impl Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.value, f)
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<i32> for Tracked {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

/// Checks that no [`Tracked`] created after this guard outlives it.
pub struct InstanceGuard {
    start: Counts,
}

impl InstanceGuard {
    pub fn new() -> Self {
        Self { start: counts() }
    }

    /// The counters, relative to when this guard was created.
    pub fn counts(&self) -> Counts {
        let now = counts();
        Counts {
            live: now.live - self.start.live,
            constructed: now.constructed - self.start.constructed,
            dropped: now.dropped - self.start.dropped,
            clone_froms: now.clone_froms - self.start.clone_froms,
        }
    }

    pub fn expect_no_instances(&self) {
        assert_eq!(self.counts().live, 0, "{:?}", self.counts());
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        if !thread::panicking() {
            self.expect_no_instances();
        }
    }
}

//////////////////////////////////////////////////////////////////

/// How many times each comparison method of [`Compared`] was called.
#[derive(Debug, Default)]
pub struct ComparisonCounters {
    pub eq: Cell<usize>,
    pub ne: Cell<usize>,
    pub lt: Cell<usize>,
    pub le: Cell<usize>,
    pub gt: Cell<usize>,
    pub ge: Cell<usize>,
    pub partial_cmp: Cell<usize>,
}

impl ComparisonCounters {
    /// The number of calls to `eq`,`ne`,`lt`,`le`,`gt`,`ge`, and `partial_cmp`, in that order.
    pub fn calls(&self) -> [usize; 7] {
        [
            self.eq.get(),
            self.ne.get(),
            self.lt.get(),
            self.le.get(),
            self.gt.get(),
            self.ge.get(),
            self.partial_cmp.get(),
        ]
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

/// A value that counts the calls to its comparison methods,
/// in the counters of the left operand.
pub struct Compared {
    value: i32,
    counters: Rc<ComparisonCounters>,
}

impl Compared {
    pub fn new(value: i32, counters: &Rc<ComparisonCounters>) -> Self {
        Self {
            value,
            counters: counters.clone(),
        }
    }
}

impl PartialEq for Compared {
    fn eq(&self, other: &Self) -> bool {
        bump(&self.counters.eq);
        self.value == other.value
    }

    #[allow(clippy::partialeq_ne_impl)]
    fn ne(&self, other: &Self) -> bool {
        bump(&self.counters.ne);
        self.value != other.value
    }
}

impl PartialOrd for Compared {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        bump(&self.counters.partial_cmp);
        self.value.partial_cmp(&other.value)
    }

    fn lt(&self, other: &Self) -> bool {
        bump(&self.counters.lt);
        self.value < other.value
    }

    fn le(&self, other: &Self) -> bool {
        bump(&self.counters.le);
        self.value <= other.value
    }

    fn gt(&self, other: &Self) -> bool {
        bump(&self.counters.gt);
        self.value > other.value
    }

    fn ge(&self, other: &Self) -> bool {
        bump(&self.counters.ge);
        self.value >= other.value
    }
}
