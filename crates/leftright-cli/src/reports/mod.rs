mod tables;

pub use self::tables::{
    community as print_community_report, distribution as print_distribution_report,
    layouts as print_layout_list, session as print_session_report,
};
