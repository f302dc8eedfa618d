mod sites;
mod tags;
mod users;

pub use sites::{CrudSite, QuerySites, SiteRepository, site_relations, site_schema};
pub use tags::{TagRepository, tag_schema};
pub use users::{CrudUser, UserRepository, user_schema};
