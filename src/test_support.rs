//! Terrain fixtures shared by unit tests.

use crate::config::PlannerConfig;
use crate::constants::*;
use crate::layer::PassContext;
use crate::pathing::AStarPathFinder;
use crate::placer::StampPlacer;
use crate::plan::Plan;
use crate::site_data::{SiteDataSource, StaticInventory, StaticSiteData};
use crate::terrain::SiteTerrain;

pub fn open_rows() -> Vec<String> {
    vec![".".repeat(SITE_WIDTH as usize); SITE_HEIGHT as usize]
}

/// Open site enclosed by a one-tile impassable border.
pub fn walled_rows() -> Vec<String> {
    let mut rows = open_rows();
    for x in 0..SITE_WIDTH {
        set_tile(&mut rows, x, 0, '#');
        set_tile(&mut rows, x, SITE_HEIGHT - 1, '#');
    }
    for y in 0..SITE_HEIGHT {
        set_tile(&mut rows, 0, y, '#');
        set_tile(&mut rows, SITE_WIDTH - 1, y, '#');
    }
    rows
}

pub fn set_tile(rows: &mut [String], x: u8, y: u8, c: char) {
    let row = &mut rows[y as usize];
    row.replace_range(x as usize..x as usize + 1, &c.to_string());
}

pub fn fill_rect(rows: &mut [String], x0: u8, y0: u8, x1: u8, y1: u8, c: char) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            set_tile(rows, x, y, c);
        }
    }
}

pub fn terrain_from(rows: &[String]) -> SiteTerrain {
    SiteTerrain::from_rows(rows).unwrap()
}

pub fn walled_terrain() -> SiteTerrain {
    terrain_from(&walled_rows())
}

/// Run `f` against a fresh pass context over `site` with the given config.
pub fn with_context<R>(
    site: &StaticSiteData,
    inventory: &StaticInventory,
    config: &PlannerConfig,
    plan: &mut Plan,
    f: impl FnOnce(&mut PassContext) -> R,
) -> R {
    let pathfinder = AStarPathFinder::for_config(&config.roads);
    let reserved = site.reserved_tiles();
    let placer = StampPlacer::new(&site.terrain, inventory, config.placement.build_inset)
        .with_reserved(&reserved);
    let mut context = PassContext::new(site, config, placer, &pathfinder, plan);
    f(&mut context)
}
