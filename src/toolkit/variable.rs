//! Variable<T>: Tk-style value cells with change tracing.
//!
//! A `Variable` mirrors the current value of a widget (an entry's text, a
//! checkbutton's on/off state) and is readable and writable by host code.
//! Variables live in a single-threaded, thread-local runtime. Effects
//! auto-track the variables they read and re-run when any of them is written.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VarId(usize);

/// Identifies an effect so it can be disposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId(usize);

// ---------------------------------------------------------------------------
// Runtime
// ---------------------------------------------------------------------------

struct VarSlot {
    /// Shared so readers and writers can release the runtime before
    /// running user code.
    value: Rc<RefCell<dyn Any>>,
    subscribers: HashSet<EffectId>,
}

struct EffectSlot {
    /// Taken out while running so the runtime is not borrowed across the
    /// callback.
    callback: Option<Box<dyn FnMut()>>,
    dependencies: HashSet<VarId>,
    active: bool,
}

#[derive(Default)]
struct Runtime {
    vars: Vec<VarSlot>,
    effects: Vec<EffectSlot>,
    tracking: Option<EffectId>,
    batch_depth: usize,
    pending: Vec<EffectId>,
    notifying: bool,
}

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::default());
}

// ---------------------------------------------------------------------------
// Variable
// ---------------------------------------------------------------------------

/// A mutable value cell. `Copy`: it only stores an id into the runtime.
pub struct Variable<T: 'static> {
    id: VarId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Copy for Variable<T> {}
impl<T: 'static> Clone for Variable<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> PartialEq for Variable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: 'static> Eq for Variable<T> {}

impl<T: 'static> fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable").field("id", &self.id.0).finish()
    }
}

impl<T: 'static> Variable<T> {
    /// Allocate a variable holding `initial`.
    pub fn new(initial: T) -> Self {
        let id = RUNTIME.with(|rt| {
            let mut rt = rt.borrow_mut();
            let id = VarId(rt.vars.len());
            rt.vars.push(VarSlot {
                value: Rc::new(RefCell::new(initial)),
                subscribers: HashSet::new(),
            });
            id
        });
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Current value. Subscribes the running effect, if any.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Read by reference. Subscribes the running effect, if any.
    ///
    /// `f` may read other variables, and this one. Writing this variable
    /// from inside `f` panics.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = RUNTIME.with(|rt| {
            let mut rt = rt.borrow_mut();
            if let Some(eid) = rt.tracking {
                rt.vars[self.id.0].subscribers.insert(eid);
                rt.effects[eid.0].dependencies.insert(self.id);
            }
            Rc::clone(&rt.vars[self.id.0].value)
        });
        let value = value.borrow();
        f(value
            .downcast_ref::<T>()
            .expect("variable type is fixed at creation"))
    }

    /// Current value without subscribing anything.
    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        let value = RUNTIME.with(|rt| Rc::clone(&rt.borrow().vars[self.id.0].value));
        let value = value.borrow();
        value
            .downcast_ref::<T>()
            .expect("variable type is fixed at creation")
            .clone()
    }

    /// Overwrite the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.update(|slot| *slot = value);
    }

    /// Mutate the value in place and notify subscribers.
    ///
    /// `f` may read or write other variables. Touching this variable from
    /// inside `f` panics.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let value = RUNTIME.with(|rt| Rc::clone(&rt.borrow().vars[self.id.0].value));
        f(value
            .borrow_mut()
            .downcast_mut::<T>()
            .expect("variable type is fixed at creation"));
        let subs = RUNTIME.with(|rt| {
            rt.borrow().vars[self.id.0]
                .subscribers
                .iter()
                .copied()
                .collect::<Vec<_>>()
        });
        notify(subs);
    }

    /// Call `f` with the new value after every write.
    ///
    /// Unlike a plain effect, the callback does not fire on registration.
    /// The value is cloned out first, so `f` may read or write other
    /// variables.
    pub fn trace(&self, mut f: impl FnMut(&T) + 'static) -> EffectId
    where
        T: Clone,
    {
        let var = *self;
        let mut armed = false;
        create_effect(move || {
            let value = var.get();
            if armed {
                f(&value);
            }
            armed = true;
        })
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Run `f` now and again whenever a variable it read is written.
pub fn create_effect(f: impl FnMut() + 'static) -> EffectId {
    let eid = RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        let eid = EffectId(rt.effects.len());
        rt.effects.push(EffectSlot {
            callback: Some(Box::new(f)),
            dependencies: HashSet::new(),
            active: true,
        });
        eid
    });
    run_effect(eid);
    eid
}

/// Stop an effect (or trace) from running again.
pub fn dispose_effect(eid: EffectId) {
    RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        if eid.0 >= rt.effects.len() {
            return;
        }
        rt.effects[eid.0].active = false;
        rt.effects[eid.0].callback = None;
        let deps: Vec<VarId> = rt.effects[eid.0].dependencies.drain().collect();
        for vid in deps {
            rt.vars[vid.0].subscribers.remove(&eid);
        }
    });
}

/// Coalesce writes made inside `f` so each affected effect runs once.
pub fn batch(f: impl FnOnce()) {
    RUNTIME.with(|rt| rt.borrow_mut().batch_depth += 1);
    f();
    let pending = RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        rt.batch_depth -= 1;
        if rt.batch_depth > 0 {
            return Vec::new();
        }
        let mut seen = HashSet::new();
        rt.pending.drain(..).filter(|id| seen.insert(*id)).collect()
    });
    notify(pending);
}

fn run_effect(eid: EffectId) {
    let callback = RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        if !rt.effects[eid.0].active {
            return None;
        }
        let old: Vec<VarId> = rt.effects[eid.0].dependencies.drain().collect();
        for vid in old {
            rt.vars[vid.0].subscribers.remove(&eid);
        }
        rt.effects[eid.0].callback.take()
    });
    let Some(mut callback) = callback else {
        return;
    };

    let previous = RUNTIME.with(|rt| rt.borrow_mut().tracking.replace(eid));
    callback();
    RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        rt.tracking = previous;
        if rt.effects[eid.0].active {
            rt.effects[eid.0].callback = Some(callback);
        }
    });
}

fn notify(subs: Vec<EffectId>) {
    if subs.is_empty() {
        return;
    }
    // Inside a batch or an ongoing notification pass: queue and let the
    // outer loop pick them up.
    let deferred = RUNTIME.with(|rt| {
        let mut rt = rt.borrow_mut();
        if rt.batch_depth > 0 || rt.notifying {
            rt.pending.extend(subs.iter().copied());
            true
        } else {
            rt.notifying = true;
            false
        }
    });
    if deferred {
        return;
    }

    let mut queue = subs;
    while !queue.is_empty() {
        for eid in std::mem::take(&mut queue) {
            run_effect(eid);
        }
        RUNTIME.with(|rt| queue.append(&mut rt.borrow_mut().pending));
    }
    RUNTIME.with(|rt| rt.borrow_mut().notifying = false);
}
