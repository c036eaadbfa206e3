use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use derive_more::Deref;
use util::{hash_map::Entry, HashMap};

use crate::SpriteSheet;

type Loader = dyn Fn(&str) -> anyhow::Result<SpriteSheet>;

/// Reference-counted cache of named sprite sheets.
///
/// A sheet is loaded the first time it is acquired and kept around for as
/// long as someone holds a `SheetHandle` to it. Cloning the cache gives
/// another reference to the same shared cache.
#[derive(Clone)]
pub struct SheetCache(Rc<RefCell<Inner>>);

struct Inner {
    loader: Box<Loader>,
    sheets: HashMap<String, Slot>,
}

struct Slot {
    sheet: Rc<SpriteSheet>,
    users: usize,
}

impl SheetCache {
    /// Create a cache that loads missing sheets with `loader`.
    pub fn new(
        loader: impl Fn(&str) -> anyhow::Result<SpriteSheet> + 'static,
    ) -> Self {
        SheetCache(Rc::new(RefCell::new(Inner {
            loader: Box::new(loader),
            sheets: Default::default(),
        })))
    }

    pub fn acquire(&self, name: &str) -> anyhow::Result<SheetHandle> {
        let mut guard = self.0.borrow_mut();
        let inner = &mut *guard;
        let slot = match inner.sheets.entry(name.to_owned()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                log::debug!("SheetCache: loading {name:?}");
                e.insert(Slot {
                    sheet: Rc::new((inner.loader)(name)?),
                    users: 0,
                })
            }
        };
        slot.users += 1;
        let sheet = slot.sheet.clone();

        Ok(SheetHandle {
            sheet,
            name: name.to_owned(),
            cache: Rc::downgrade(&self.0),
        })
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.0.borrow().sheets.contains_key(name)
    }

    /// Number of live handles to the named sheet.
    pub fn users(&self, name: &str) -> usize {
        self.0.borrow().sheets.get(name).map_or(0, |e| e.users)
    }
}

impl Inner {
    fn release(&mut self, name: &str) {
        let Some(slot) = self.sheets.get_mut(name) else {
            log::warn!("SheetCache: released unknown sheet {name:?}");
            return;
        };

        slot.users -= 1;
        if slot.users == 0 {
            log::debug!("SheetCache: freeing {name:?}");
            self.sheets.remove(name);
        }
    }
}

/// Shared access to a cached sprite sheet, released when dropped.
#[derive(Deref)]
pub struct SheetHandle {
    #[deref]
    sheet: Rc<SpriteSheet>,
    name: String,
    cache: Weak<RefCell<Inner>>,
}

impl SheetHandle {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for SheetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SheetHandle({:?})", self.name)
    }
}

impl Drop for SheetHandle {
    fn drop(&mut self) {
        if let Some(cache) = self.cache.upgrade() {
            cache.borrow_mut().release(&self.name);
        }
    }
}
