use hero_core::{
    BackgroundVariant, DecodedImage, HeroConfig, OneShot, OrientationWatch, PendingAssets,
    Viewport,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Background,
    Sprite,
}

impl AssetKind {
    fn slot(self, assets: &mut PendingAssets) -> &mut OneShot<DecodedImage> {
        match self {
            AssetKind::Background => &mut assets.background,
            AssetKind::Sprite => &mut assets.sprite,
        }
    }
}

pub struct Loaded {
    pub kind: AssetKind,
    pub generation: u32,
    pub result: anyhow::Result<DecodedImage>,
}

/// Reads and decodes images off the event-loop thread.
pub struct DiskLoader {
    root: PathBuf,
    // Bumped per background request so a superseded load is dropped
    background_generation: u32,
    tx: Sender<Loaded>,
    rx: Receiver<Loaded>,
}

fn load(path: &Path) -> anyhow::Result<DecodedImage> {
    let bytes =
        std::fs::read(path).map_err(|e| anyhow::anyhow!("read {}: {}", path.display(), e))?;
    Ok(DecodedImage::decode(&bytes)?)
}

impl DiskLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (tx, rx) = channel();
        Self {
            root: root.into(),
            background_generation: 0,
            tx,
            rx,
        }
    }

    /// Web-style paths (`./assets/...`) are taken relative to the asset root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches("./"))
    }

    /// Generation a new request of `kind` is tagged with.
    pub fn next_generation(&mut self, kind: AssetKind) -> u32 {
        if kind == AssetKind::Background {
            self.background_generation += 1;
        }
        self.background_generation
    }

    pub fn spawn(&mut self, path: &str, kind: AssetKind) {
        let generation = self.next_generation(kind);
        let path = self.resolve(path);
        log::info!("[assets] loading {:?} from {}", kind, path.display());
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("load-{:?}", kind).to_lowercase())
            .spawn(move || {
                // Receiver gone means the window closed
                let _ = tx.send(Loaded {
                    kind,
                    generation,
                    result: load(&path),
                });
            });
        if let Err(e) = spawned {
            log::error!("[assets] cannot start loader for {:?}: {}", kind, e);
        }
    }

    /// Load the other background after the window crossed the
    /// portrait/landscape boundary. A minimised window (zero physical size)
    /// never counts as a flip.
    pub fn reload_on_flip(
        &mut self,
        watch: &mut OrientationWatch,
        physical: (u32, u32),
        viewport: Viewport,
        config: &HeroConfig,
        assets: &mut PendingAssets,
    ) -> bool {
        if physical.0 == 0 || physical.1 == 0 || !watch.changed(viewport) {
            return false;
        }
        *watch = OrientationWatch::new(viewport);
        assets.reset_background();
        self.spawn(
            BackgroundVariant::select(viewport).path(config),
            AssetKind::Background,
        );
        true
    }

    /// Put one finished load into its slot. Superseded backgrounds are
    /// dropped; failures stay pending forever.
    pub fn accept(&self, loaded: Loaded, assets: &mut PendingAssets) -> bool {
        if loaded.kind == AssetKind::Background
            && loaded.generation != self.background_generation
        {
            log::debug!("[assets] dropping superseded background");
            return false;
        }
        match loaded.result {
            Ok(img) => match loaded.kind.slot(assets).deliver(img) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("[assets] {:?}: {}", loaded.kind, e);
                    false
                }
            },
            Err(e) => {
                log::error!("[assets] {:?} unavailable: {:?}", loaded.kind, e);
                false
            }
        }
    }

    pub fn poll(&self, assets: &mut PendingAssets) {
        while let Ok(loaded) = self.rx.try_recv() {
            self.accept(loaded, assets);
        }
    }
}
