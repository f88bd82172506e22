//! Native folder / file picker using IFileOpenDialog.

use std::path::{Path, PathBuf};

use windows::Win32::System::Com::{
    CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx,
    CoTaskMemFree, CoUninitialize, IBindCtx,
};
use windows::Win32::UI::Shell::Common::COMDLG_FILTERSPEC;
use windows::Win32::UI::Shell::{
    FOS_FILEMUSTEXIST, FOS_FORCEFILESYSTEM, FOS_PICKFOLDERS, FileOpenDialog, IFileOpenDialog,
    IShellItem, SHCreateItemFromParsingName, SIGDN_FILESYSPATH,
};
use windows::core::{HSTRING, PCWSTR};

use wuwa_types::error::{LauncherError, Result};

use crate::services::FileFilter;

/// Show a modal picker. Returns `Ok(None)` when the user cancels.
pub fn pick(
    initial_dir: &Path,
    title: &str,
    folders: bool,
    filters: &[FileFilter],
) -> Result<Option<PathBuf>> {
    // S_FALSE (already initialised on this thread) still needs a matching
    // CoUninitialize; RPC_E_CHANGED_MODE does not.
    let initialized = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }.is_ok();
    let result = pick_impl(initial_dir, title, folders, filters)
        .map_err(|e| LauncherError::Dialog(e.to_string()));
    if initialized {
        unsafe { CoUninitialize() };
    }
    result
}

fn pick_impl(
    initial_dir: &Path,
    title: &str,
    folders: bool,
    filters: &[FileFilter],
) -> windows::core::Result<Option<PathBuf>> {
    unsafe {
        let dialog: IFileOpenDialog =
            CoCreateInstance(&FileOpenDialog, None, CLSCTX_INPROC_SERVER)?;

        let mut options = dialog.GetOptions()? | FOS_FORCEFILESYSTEM;
        if folders {
            options |= FOS_PICKFOLDERS;
        } else {
            options |= FOS_FILEMUSTEXIST;
        }
        dialog.SetOptions(options)?;
        dialog.SetTitle(&HSTRING::from(title))?;

        if let Ok(folder) =
            SHCreateItemFromParsingName::<_, _, IShellItem>(
                &HSTRING::from(initial_dir),
                None::<&IBindCtx>,
            )
        {
            let _ = dialog.SetFolder(&folder);
        }

        // The HSTRINGs must outlive the filter spec array that points into them.
        let owned: Vec<(HSTRING, HSTRING)> = filters
            .iter()
            .map(|f| (HSTRING::from(f.name), HSTRING::from(f.spec())))
            .collect();
        let specs: Vec<COMDLG_FILTERSPEC> = owned
            .iter()
            .map(|(name, spec)| COMDLG_FILTERSPEC {
                pszName: PCWSTR(name.as_ptr()),
                pszSpec: PCWSTR(spec.as_ptr()),
            })
            .collect();
        if !specs.is_empty() {
            dialog.SetFileTypes(&specs)?;
        }

        // Show returns an error when cancelled.
        if dialog.Show(None).is_err() {
            return Ok(None);
        }

        let item: IShellItem = dialog.GetResult()?;
        let path_ptr = item.GetDisplayName(SIGDN_FILESYSPATH)?;
        let path_str = path_ptr.to_string();
        CoTaskMemFree(Some(path_ptr.as_ptr() as *const _));
        Ok(path_str.ok().map(PathBuf::from))
    }
}
