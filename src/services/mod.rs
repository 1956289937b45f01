pub mod favourites;
pub mod genres;
pub mod providers;
pub mod registry;
pub mod retrieval;
pub mod selection;
