pub mod timeline_back;
pub mod timeline_front;
pub mod trace;
