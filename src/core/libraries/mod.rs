mod cache;
mod list;

pub use cache::{LibrariesList, LibraryListCache};
pub use list::{parse_libraries_list, read_server_libraries, LIBRARIES_LIST_ENTRY};
