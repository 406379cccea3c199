use core::fmt;

use crate::client::package::PackageSaved;

use super::driver::{BytesDownloaded, ResponseText};

impl fmt::Display for ResponseText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl fmt::Display for BytesDownloaded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Downloaded {} bytes", self.num_bytes())
    }
}

impl fmt::Display for PackageSaved {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Unpacked {} entries into {}",
            self.num_entries(),
            self.path().display()
        )
    }
}
